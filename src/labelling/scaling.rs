use crate::types::Label;

/// Map raw binary DP state indices to canonical labels: 0 → Down, 1 → Up.
///
/// Callers guarantee indices stay in 0..2; the reconstruction that produces
/// them cannot emit anything else.
pub fn scale_binary(path: &[usize]) -> Vec<Label> {
    path.iter()
        .map(|&state| if state == 0 { Label::Down } else { Label::Up })
        .collect()
}

/// Map raw ternary DP state indices to canonical labels:
/// 0 → Down, 1 → Neutral, 2 → Up.
pub fn scale_ternary(path: &[usize]) -> Vec<Label> {
    path.iter()
        .map(|&state| match state {
            0 => Label::Down,
            1 => Label::Neutral,
            _ => Label::Up,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_binary() {
        assert_eq!(
            scale_binary(&[0, 1, 0]),
            vec![Label::Down, Label::Up, Label::Down]
        );
    }

    #[test]
    fn test_scale_ternary() {
        assert_eq!(
            scale_ternary(&[0, 1, 2]),
            vec![Label::Down, Label::Neutral, Label::Up]
        );
    }

    #[test]
    fn test_scaling_preserves_length() {
        assert_eq!(scale_binary(&[]).len(), 0);
        assert_eq!(scale_ternary(&[1, 1, 1, 1]).len(), 4);
    }
}
