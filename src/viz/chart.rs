use crate::types::Label;
use chrono::NaiveDateTime;

const PRICE_LINE: egui::Color32 = egui::Color32::from_rgb(130, 170, 255);
const UP_SWATCH: egui::Color32 = egui::Color32::from_rgb(60, 170, 90);
const DOWN_SWATCH: egui::Color32 = egui::Color32::from_rgb(165, 110, 60);
const GRID_DIVISIONS: usize = 4;

/// Close-price chart with label-tinted background spans.
///
/// Consecutive bars sharing a label are merged into one span so a long
/// trend renders as a single block instead of a striped sequence.
pub struct ChartView;

impl ChartView {
    pub fn show(
        ui: &mut egui::Ui,
        prices: &[f64],
        labels: &[Label],
        timestamps: Option<&[NaiveDateTime]>,
    ) {
        if prices.len() < 2 || labels.len() != prices.len() {
            ui.centered_and_justified(|ui| {
                ui.label("Load a CSV file to draw the chart");
            });
            return;
        }
        let timestamps = timestamps.filter(|ts| ts.len() == prices.len());

        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::hover());
        let (min_price, max_price) = price_range(prices);
        let frame = PlotFrame {
            rect: response.rect.shrink(8.0),
            min_price,
            max_price,
            len: prices.len(),
        };

        Self::paint_label_spans(&painter, &frame, labels);
        Self::paint_gridlines(&painter, &frame, timestamps);
        Self::paint_price_line(&painter, &frame, prices);
        Self::paint_legend(&painter, &frame);
        Self::paint_hover(&painter, &frame, &response, prices, labels, timestamps);
    }

    fn paint_label_spans(painter: &egui::Painter, frame: &PlotFrame, labels: &[Label]) {
        for (start, end, label) in label_spans(labels) {
            let fill = match label {
                Label::Up => egui::Color32::from_rgba_unmultiplied(50, 160, 80, 60),
                Label::Down => egui::Color32::from_rgba_unmultiplied(150, 95, 55, 70),
                Label::Neutral => continue,
            };
            let span = egui::Rect::from_min_max(
                egui::pos2(
                    frame.x(start as f64 - 0.5).max(frame.rect.left()),
                    frame.rect.top(),
                ),
                egui::pos2(
                    frame.x(end as f64 + 0.5).min(frame.rect.right()),
                    frame.rect.bottom(),
                ),
            );
            painter.rect_filled(span, 0.0, fill);
        }
    }

    fn paint_gridlines(
        painter: &egui::Painter,
        frame: &PlotFrame,
        timestamps: Option<&[NaiveDateTime]>,
    ) {
        let stroke = egui::Stroke::new(1.0, egui::Color32::from_gray(70));
        let font = egui::FontId::proportional(10.0);

        for i in 0..=GRID_DIVISIONS {
            let t = i as f64 / GRID_DIVISIONS as f64;
            let price = frame.min_price + t * (frame.max_price - frame.min_price);
            let y = frame.y(price);
            painter.line_segment(
                [
                    egui::pos2(frame.rect.left(), y),
                    egui::pos2(frame.rect.right(), y),
                ],
                stroke,
            );
            painter.text(
                egui::pos2(frame.rect.left() + 2.0, y - 2.0),
                egui::Align2::LEFT_BOTTOM,
                format!("{:.2}", price),
                font.clone(),
                egui::Color32::GRAY,
            );
        }

        for i in 0..=GRID_DIVISIONS {
            let bar = i * (frame.len - 1) / GRID_DIVISIONS;
            let x = frame.x(bar as f64);
            painter.line_segment(
                [
                    egui::pos2(x, frame.rect.top()),
                    egui::pos2(x, frame.rect.bottom()),
                ],
                stroke,
            );
            let tick = match timestamps {
                Some(ts) => ts[bar].format("%Y-%m-%d").to_string(),
                None => bar.to_string(),
            };
            painter.text(
                egui::pos2(x + 2.0, frame.rect.bottom() - 2.0),
                egui::Align2::LEFT_BOTTOM,
                tick,
                font.clone(),
                egui::Color32::GRAY,
            );
        }
    }

    fn paint_price_line(painter: &egui::Painter, frame: &PlotFrame, prices: &[f64]) {
        let points: Vec<egui::Pos2> = prices
            .iter()
            .enumerate()
            .map(|(bar, price)| egui::pos2(frame.x(bar as f64), frame.y(*price)))
            .collect();
        painter.add(egui::Shape::line(points, egui::Stroke::new(1.5, PRICE_LINE)));
    }

    fn paint_legend(painter: &egui::Painter, frame: &PlotFrame) {
        let entries = [
            ("Close", PRICE_LINE),
            ("Uptrend", UP_SWATCH),
            ("Downtrend", DOWN_SWATCH),
        ];
        let origin = frame.rect.left_top() + egui::vec2(10.0, 10.0);
        let panel = egui::Rect::from_min_size(
            origin,
            egui::vec2(104.0, entries.len() as f32 * 18.0 + 8.0),
        );
        painter.rect_filled(
            panel,
            4.0,
            egui::Color32::from_rgba_unmultiplied(20, 20, 20, 190),
        );
        for (i, (text, colour)) in entries.iter().enumerate() {
            let y = origin.y + 6.0 + i as f32 * 18.0;
            let swatch = egui::Rect::from_min_size(
                egui::pos2(origin.x + 8.0, y + 3.0),
                egui::vec2(14.0, 8.0),
            );
            painter.rect_filled(swatch, 2.0, *colour);
            painter.text(
                egui::pos2(origin.x + 28.0, y),
                egui::Align2::LEFT_TOP,
                *text,
                egui::FontId::proportional(11.0),
                egui::Color32::WHITE,
            );
        }
    }

    fn paint_hover(
        painter: &egui::Painter,
        frame: &PlotFrame,
        response: &egui::Response,
        prices: &[f64],
        labels: &[Label],
        timestamps: Option<&[NaiveDateTime]>,
    ) {
        let Some(pos) = response.hover_pos() else {
            return;
        };
        if !frame.rect.contains(pos) {
            return;
        }
        let bar = frame.bar_at(pos.x);
        let x = frame.x(bar as f64);

        painter.line_segment(
            [
                egui::pos2(x, frame.rect.top()),
                egui::pos2(x, frame.rect.bottom()),
            ],
            egui::Stroke::new(1.0, egui::Color32::from_gray(140)),
        );
        painter.circle_filled(
            egui::pos2(x, frame.y(prices[bar])),
            3.0,
            egui::Color32::WHITE,
        );

        let when = match timestamps {
            Some(ts) => ts[bar].format("%Y-%m-%d %H:%M").to_string(),
            None => format!("bar {}", bar),
        };
        painter.text(
            frame.rect.right_top() + egui::vec2(-10.0, 10.0),
            egui::Align2::RIGHT_TOP,
            format!("{} | close {:.4} | {}", when, prices[bar], labels[bar]),
            egui::FontId::proportional(12.0),
            egui::Color32::WHITE,
        );
    }
}

/// Screen mapping for the plot area.
struct PlotFrame {
    rect: egui::Rect,
    min_price: f64,
    max_price: f64,
    len: usize,
}

impl PlotFrame {
    fn x(&self, bar: f64) -> f32 {
        let t = (bar / (self.len - 1) as f64) as f32;
        self.rect.left() + t * self.rect.width()
    }

    fn y(&self, price: f64) -> f32 {
        let t = ((price - self.min_price) / (self.max_price - self.min_price)) as f32;
        self.rect.bottom() - t * self.rect.height()
    }

    fn bar_at(&self, x: f32) -> usize {
        let t = ((x - self.rect.left()) / self.rect.width()).clamp(0.0, 1.0);
        (t * (self.len - 1) as f32).round() as usize
    }
}

/// Vertical range of the plot, padded so the line never sits on the border.
fn price_range(prices: &[f64]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for price in prices {
        min = min.min(*price);
        max = max.max(*price);
    }
    let pad = ((max - min) * 0.05).max(1e-9);
    (min - pad, max + pad)
}

/// Maximal runs of equal labels as inclusive `(start, end, label)` triples.
fn label_spans(labels: &[Label]) -> Vec<(usize, usize, Label)> {
    let mut spans = Vec::new();
    let mut start = 0;
    while start < labels.len() {
        let label = labels[start];
        let mut end = start;
        while end + 1 < labels.len() && labels[end + 1] == label {
            end += 1;
        }
        spans.push((start, end, label));
        start = end + 1;
    }
    spans
}
