use super::traits::ConfigSection;
use crate::error::Result;
use crate::returns::FeesConfig;

impl ConfigSection for FeesConfig {
    fn section_name() -> &'static str {
        "fees"
    }

    fn validate(&self) -> Result<()> {
        FeesConfig::new(
            self.lp_transaction_fees(),
            self.sp_transaction_fees(),
            self.lp_holding_fees(),
            self.sp_holding_fees(),
        )
        .map(|_| ())
    }
}
