use crate::config::LabellingConfig;
use crate::data::CsvSource;
use crate::labelling::{LabellerFamily, TrendLabeller};
use crate::types::Label;
use crate::viz::chart::ChartView;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// Interactive label viewer: load a close series, pick a labeller and its
/// parameters, inspect the result on a chart. Relabelling runs synchronously
/// whenever a parameter changes.
pub struct TrendlabApp {
    data_file_path: Option<PathBuf>,
    prices: Vec<f64>,
    timestamps: Option<Vec<NaiveDateTime>>,
    labels: Vec<Label>,
    family: LabellerFamily,
    params: LabellingConfig,
    status_message: String,
}

impl Default for TrendlabApp {
    fn default() -> Self {
        Self {
            data_file_path: None,
            prices: Vec::new(),
            timestamps: None,
            labels: Vec::new(),
            family: LabellerFamily::BinaryCtl,
            params: LabellingConfig::default(),
            status_message: "No data loaded".to_string(),
        }
    }
}

impl TrendlabApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    fn show_data_controls(&mut self, ui: &mut egui::Ui) {
        if ui.button("Open CSV...").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("CSV Files", &["csv"])
                .pick_file()
            {
                match Self::load_series(&path) {
                    Ok((prices, timestamps)) => {
                        self.data_file_path = Some(path);
                        self.prices = prices;
                        self.timestamps = timestamps;
                        self.relabel();
                    }
                    Err(e) => {
                        self.status_message = format!("Error loading data: {}", e);
                    }
                }
            }
        }

        if let Some(path) = &self.data_file_path {
            ui.label(format!(
                "File: {}",
                path.file_name().unwrap_or_default().to_string_lossy()
            ));
            ui.label(format!("Bars: {}", self.prices.len()));
        }
    }

    fn show_labeller_controls(&mut self, ui: &mut egui::Ui) {
        ui.label("Labeller:");
        let previous = self.family;
        egui::ComboBox::from_id_salt("labeller_family")
            .selected_text(family_label(self.family))
            .show_ui(ui, |ui| {
                for family in LabellerFamily::ALL {
                    ui.selectable_value(&mut self.family, family, family_label(family));
                }
            });
        let mut changed = previous != self.family;

        ui.separator();

        match self.family {
            LabellerFamily::BinaryCtl => {
                ui.horizontal(|ui| {
                    ui.label("Omega:");
                    changed |= ui
                        .add(
                            egui::DragValue::new(&mut self.params.omega)
                                .speed(0.0005)
                                .range(0.0..=0.1)
                                .fixed_decimals(4),
                        )
                        .changed();
                });
            }
            LabellerFamily::TernaryCtl => {
                ui.horizontal(|ui| {
                    ui.label("Change Threshold:");
                    changed |= ui
                        .add(
                            egui::DragValue::new(&mut self.params.marginal_change_thres)
                                .speed(0.001)
                                .range(0.0..=1.0)
                                .fixed_decimals(4),
                        )
                        .changed();
                });
                ui.horizontal(|ui| {
                    ui.label("Window Size:");
                    changed |= ui
                        .add(egui::DragValue::new(&mut self.params.window_size).range(1..=5000))
                        .changed();
                });
            }
            LabellerFamily::OracleBinary => {
                ui.horizontal(|ui| {
                    ui.label("Transaction Cost:");
                    changed |= ui
                        .add(
                            egui::DragValue::new(&mut self.params.transaction_cost)
                                .speed(0.0005)
                                .range(0.0..=0.1)
                                .fixed_decimals(4),
                        )
                        .changed();
                });
            }
            LabellerFamily::OracleTernary => {
                ui.horizontal(|ui| {
                    ui.label("Transaction Cost:");
                    changed |= ui
                        .add(
                            egui::DragValue::new(&mut self.params.transaction_cost)
                                .speed(0.0005)
                                .range(0.0..=0.1)
                                .fixed_decimals(4),
                        )
                        .changed();
                });
                ui.horizontal(|ui| {
                    ui.label("Trend Coefficient:");
                    changed |= ui
                        .add(
                            egui::DragValue::new(&mut self.params.trend_coeff)
                                .speed(0.001)
                                .range(0.0..=1.0)
                                .fixed_decimals(4),
                        )
                        .changed();
                });
            }
        }

        if changed {
            self.relabel();
        }
    }

    fn show_label_summary(&self, ui: &mut egui::Ui) {
        if self.labels.is_empty() {
            ui.label("No labels yet");
            return;
        }
        let up = self.labels.iter().filter(|l| **l == Label::Up).count();
        let down = self.labels.iter().filter(|l| **l == Label::Down).count();
        let neutral = self.labels.len() - up - down;
        ui.label(format!("Up: {}", up));
        ui.label(format!("Down: {}", down));
        ui.label(format!("Neutral: {}", neutral));
    }

    fn relabel(&mut self) {
        if self.prices.len() < 2 {
            self.labels.clear();
            return;
        }
        let params = self.params.params_for(self.family);
        let result = self
            .family
            .build(&params)
            .and_then(|labeller| labeller.get_labels(&self.prices));
        match result {
            Ok(labels) => {
                self.labels = labels;
                self.status_message = format!(
                    "{} bars labelled with {}",
                    self.prices.len(),
                    family_label(self.family)
                );
            }
            Err(e) => {
                self.labels.clear();
                self.status_message = format!("Labelling failed: {}", e);
            }
        }
    }

    fn load_series(path: &Path) -> Result<(Vec<f64>, Option<Vec<NaiveDateTime>>), String> {
        CsvSource::load_close_series(path).map_err(|e| e.to_string())
    }
}

impl eframe::App for TrendlabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Trendlab");
                ui.separator();
                ui.label(&self.status_message);
            });
        });

        egui::SidePanel::left("left_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.heading("Configuration");
                    ui.separator();

                    ui.collapsing("Data", |ui| {
                        self.show_data_controls(ui);
                    });

                    ui.separator();

                    ui.collapsing("Labelling", |ui| {
                        self.show_labeller_controls(ui);
                    });

                    ui.separator();

                    ui.collapsing("Summary", |ui| {
                        self.show_label_summary(ui);
                    });
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ChartView::show(
                ui,
                &self.prices,
                &self.labels,
                self.timestamps.as_deref(),
            );
        });
    }
}

fn family_label(family: LabellerFamily) -> &'static str {
    match family {
        LabellerFamily::BinaryCtl => "Binary CTL",
        LabellerFamily::TernaryCtl => "Ternary CTL",
        LabellerFamily::OracleBinary => "Oracle Binary",
        LabellerFamily::OracleTernary => "Oracle Ternary",
    }
}
