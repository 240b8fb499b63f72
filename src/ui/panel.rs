//! The gallery picker: one card per demo, anchored to the right edge.

use crate::demos::{DemoInfo, DemoManager};
use crate::gfx::scene::SceneStatistics;

const PANEL_WIDTH: f32 = 320.0;

/// Draws the demo picker and returns the id of a newly chosen demo.
pub fn gallery_panel(ui: &imgui::Ui, demos: &DemoManager, stats: SceneStatistics) -> Option<&'static str> {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return None;
    }

    let mut chosen = None;
    ui.window("Gallery")
        .size([PANEL_WIDTH, 0.0], imgui::Condition::FirstUseEver)
        .position([display_size[0] - PANEL_WIDTH - 20.0, display_size[1] * 0.45], imgui::Condition::FirstUseEver)
        .collapsible(true)
        .always_auto_resize(true)
        .build(|| {
            let active = demos.active_id();
            for info in demos.entries() {
                if demo_card(ui, info, active == Some(info.id)) && active != Some(info.id) {
                    chosen = Some(info.id);
                }
            }

            ui.separator();
            ui.text_disabled(format!(
                "{} objects, {} triangles, {} lights",
                stats.object_count, stats.total_triangles, stats.light_count
            ));
        });
    chosen
}

fn demo_card(ui: &imgui::Ui, info: &DemoInfo, selected: bool) -> bool {
    let clicked = ui
        .selectable_config(info.name)
        .selected(selected)
        .allow_double_click(false)
        .build();
    ui.indent();
    ui.text_wrapped(info.description);
    ui.unindent();
    ui.spacing();
    clicked
}
