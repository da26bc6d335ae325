// ui.rs - egui front-end: grid page for BFS/DFS, bar page for the sorts

use std::time::Duration;

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use viz_core::{CellState, Position, SortAlgorithm, TraversalKind};

use crate::{View, Visualizer, VisualizerInterface};

impl eframe::App for Visualizer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.view, View::Graph, "Graph Algorithms");
                ui.selectable_value(&mut self.view, View::Sort, "Sorting Algorithms");
            });

            ui.separator();

            match self.view {
                View::Graph => self.graph_page(ui),
                View::Sort => self.sort_page(ui),
            }

            ui.separator();
            ui.label(self.status.as_str());
        });

        // Keep pulling snapshots while a run is in flight
        if self.is_running() {
            ctx.request_repaint_after(Duration::from_millis(self.step_delay_ms.clamp(1, 16)));
        }
    }
}

impl Visualizer {
    fn speed_control(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Step delay:");
            ui.add(egui::Slider::new(&mut self.step_delay_ms, 0..=500).suffix(" ms"));
            ui.label("(applies to the next run)");
        });
    }

    fn graph_page(&mut self, ui: &mut egui::Ui) {
        ui.heading("Visualizer for Graph Algorithm");

        // Controls
        ui.horizontal(|ui| {
            let ready = self.board.is_ready();
            for kind in TraversalKind::ALL {
                if ui.add_enabled(ready, egui::Button::new(format!("Start {kind}"))).clicked() {
                    self.start_traversal(kind);
                }
            }

            if ui.add_enabled(self.is_running(), egui::Button::new("⏹ Stop")).clicked() {
                self.stop_run();
            }

            if ui.button("Reset").clicked() {
                self.reset_grid();
            }
        });

        self.speed_control(ui);

        ui.separator();

        // Draw the grid
        let box_size = 25.0;
        let spacing = 1.0;
        let rows = self.board.grid().rows();
        let cols = self.board.grid().cols();

        let start_pos = ui.cursor().min;
        let total_size = Vec2::new(
            (box_size + spacing) * cols as f32 - spacing,
            (box_size + spacing) * rows as f32 - spacing,
        );

        let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());

        // Fill background
        painter.rect_filled(
            Rect::from_min_size(start_pos, total_size),
            0.0,
            Color32::BLACK,
        );

        let mut clicked = None;
        for row in 0..rows {
            for col in 0..cols {
                let pos = Position::new(row, col);
                let x = start_pos.x + col as f32 * (box_size + spacing);
                let y = start_pos.y + row as f32 * (box_size + spacing);

                let rect = Rect::from_min_size(egui::pos2(x, y), Vec2::splat(box_size));

                let cell_color = match self.board.grid().get(pos) {
                    Some(CellState::Visited) => self.visited_color,
                    Some(CellState::Start) => self.start_color,
                    Some(CellState::End) => self.end_color,
                    _ => self.empty_color,
                };

                painter.rect_filled(rect, 0.0, cell_color);
                painter.rect_stroke(rect, 0.0, Stroke::new(0.5, Color32::BLACK));

                if response.clicked() {
                    if let Some(pointer) = response.interact_pointer_pos() {
                        if rect.contains(pointer) {
                            clicked = Some(pos);
                        }
                    }
                }
            }
        }

        if let Some(pos) = clicked {
            self.select_cell(pos);
        }

        ui.separator();

        // Statistics
        let grid = self.board.grid();
        ui.horizontal(|ui| {
            ui.label(format!("Visited cells: {}", grid.count(CellState::Visited)));
            ui.label(format!("Empty cells: {}", grid.count(CellState::Empty)));
        });
    }

    fn sort_page(&mut self, ui: &mut egui::Ui) {
        ui.heading("Visualizer for Sorting Algorithm");

        // Controls
        ui.horizontal(|ui| {
            for algorithm in SortAlgorithm::ALL {
                if ui.button(format!("Start {algorithm}")).clicked() {
                    self.start_sort(algorithm);
                }
            }

            ui.separator();

            if ui.button("🎲 Shuffle").clicked() {
                self.shuffle();
            }

            if ui.add_enabled(self.is_running(), egui::Button::new("⏹ Stop")).clicked() {
                self.stop_run();
            }
        });

        self.speed_control(ui);

        ui.horizontal(|ui| {
            let label = if self.has_audio() { "Tones" } else { "Tones (no audio device)" };
            ui.checkbox(&mut self.config.audio_enabled, label);
            match self.last_tone {
                Some(tone) => ui.label(format!("♪ {:.0} Hz (value {})", tone.frequency_hz, tone.value)),
                None => ui.label("♪ -"),
            };
        });

        ui.separator();

        // Bar graph
        let values = self.bars.values();
        let n = values.len().max(1) as f32;
        let total_size = Vec2::new(ui.available_width().min(1100.0), 400.0);
        let (response, painter) = ui.allocate_painter(total_size, egui::Sense::hover());
        let area = response.rect;
        let bar_width = area.width() / n;

        for (i, &value) in values.iter().enumerate() {
            let height = area.height() * value as f32 / n;
            let left = area.left() + i as f32 * bar_width;
            let rect = Rect::from_min_max(
                egui::pos2(left + 0.5, area.bottom() - height),
                egui::pos2(left + bar_width - 0.5, area.bottom()),
            );
            painter.rect_filled(rect, 0.0, self.bar_color);
        }

        ui.label(if self.bars.is_sorted() { "Sorted" } else { "Unsorted" });
    }
}
