use egui::{Color32, Visuals};

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

fn blend(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |c1: u8, c2: u8| -> u8 { ((c1 as f32 * (1.0 - t)) + (c2 as f32 * t)).round() as u8 };
    Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
}

#[derive(Clone, Copy, Debug)]
pub struct TimeGridPalette {
    pub label_bg: Color32,
    pub regular_bg: Color32,
    pub alternate_bg: Color32,
    pub hour_line: Color32,
    pub divider: Color32,
    pub label_text: Color32,
    pub block_fallback: Color32,
    pub block_text: Color32,
    pub drop_valid: Color32,
    pub drop_invalid: Color32,
    pub magnet: Color32,
}

impl TimeGridPalette {
    pub fn from_visuals(visuals: &Visuals) -> Self {
        let base = visuals.extreme_bg_color;
        let border = visuals.widgets.noninteractive.bg_stroke.color;
        Self {
            label_bg: blend(visuals.panel_fill, base, 0.4),
            regular_bg: base,
            alternate_bg: blend(base, visuals.faint_bg_color, 0.6),
            hour_line: border,
            divider: with_alpha(border, 220),
            label_text: visuals.weak_text_color(),
            block_fallback: Color32::from_rgb(100, 150, 200),
            block_text: Color32::WHITE,
            drop_valid: Color32::from_rgb(120, 200, 120),
            drop_invalid: Color32::from_rgb(220, 90, 90),
            magnet: with_alpha(visuals.selection.stroke.color, if visuals.dark_mode { 200 } else { 160 }),
        }
    }
}

impl Default for TimeGridPalette {
    fn default() -> Self {
        Self::from_visuals(&Visuals::dark())
    }
}
