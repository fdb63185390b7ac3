use eframe::egui;

use crate::state::DashboardState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ExplorerApp {
    pub state: DashboardState,
}

impl ExplorerApp {
    pub fn new(state: DashboardState) -> Self {
        Self { state }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: the page, one section per graph ----
        let mut events = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| ui.heading(self.state.layout.title));
                    for section in &self.state.layout.sections {
                        ui.separator();
                        panels::section(ui, &self.state, section, &mut events);
                    }
                });
        });

        // Widgets only read state while drawing; changes land here.
        for event in &events {
            self.state.dispatch(event);
        }
        if !events.is_empty() {
            ctx.request_repaint();
        }
    }
}
