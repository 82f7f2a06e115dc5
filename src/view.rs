use std::sync::mpsc::Receiver;
use log::info;
use raylib::prelude::*;
use crate::constants::*;
use crate::error::Result;
use crate::roulette::Roulette;
use crate::state::{RouletteState, TriggerOutcome};

const EXHAUSTED_NOTICE: &str = "All images have been drawn. The application will now exit.";
const NOTICE_FONT_SIZE: i32 = 20;
const BUTTON_FONT_SIZE: i32 = 24;

/// Scale that fits a texture inside an area; big images shrink, small ones stay 1:1.
pub fn fit_scale(tex_width: f32, tex_height: f32, area_width: f32, area_height: f32) -> f32 {
    if tex_width <= 0.0 || tex_height <= 0.0 {
        return 1.0;
    }
    let scale_x = area_width * IMAGE_FILL / tex_width;
    let scale_y = area_height * IMAGE_FILL / tex_height;
    scale_x.min(scale_y).min(1.0).max(0.0)
}

/// Start button, centered under the image area.
pub fn start_button_rect(screen_width: f32, screen_height: f32) -> Rectangle {
    Rectangle::new(
        (screen_width - BUTTON_WIDTH) * 0.5,
        screen_height - BUTTON_HEIGHT - BUTTON_MARGIN,
        BUTTON_WIDTH,
        BUTTON_HEIGHT,
    )
}

/// OK button of the exhaustion notice, below the screen center.
pub fn notice_button_rect(screen_width: f32, screen_height: f32) -> Rectangle {
    Rectangle::new(
        (screen_width - BUTTON_WIDTH) * 0.5,
        screen_height * 0.5 + BUTTON_MARGIN,
        BUTTON_WIDTH,
        BUTTON_HEIGHT,
    )
}

pub fn contains(rect: Rectangle, point: Vector2) -> bool {
    point.x >= rect.x
        && point.x <= rect.x + rect.width
        && point.y >= rect.y
        && point.y <= rect.y + rect.height
}

pub struct RouletteView {
    textures: Vec<Texture2D>,
    roulette: Roulette,
    display_changes: Receiver<usize>,
    shown: usize,
    notice_open: bool,
}

impl RouletteView {
    pub fn new(textures: Vec<Texture2D>, mut roulette: Roulette) -> Self {
        let display_changes = roulette.subscribe();
        let shown = roulette.current();
        Self { textures, roulette, display_changes, shown, notice_open: false }
    }

    /// Handles input and draws one frame. Returns `false` once the app should close.
    pub fn frame(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) -> Result<bool> {
        self.roulette.poll()?;
        if let Some(index) = self.display_changes.try_iter().last() {
            self.shown = index;
        }

        let screen_width = rl.get_screen_width() as f32;
        let screen_height = rl.get_screen_height() as f32;
        let start_button = start_button_rect(screen_width, screen_height);
        let ok_button = notice_button_rect(screen_width, screen_height);

        let mouse = rl.get_mouse_position();
        let clicked = rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT);
        let key_pressed = rl.is_key_pressed(KeyboardKey::KEY_SPACE) || rl.is_key_pressed(KeyboardKey::KEY_ENTER);

        if self.notice_open {
            if key_pressed || (clicked && contains(ok_button, mouse)) {
                info!("Completion acknowledged, closing");
                return Ok(false);
            }
        } else if !self.roulette.is_locked()
            && (key_pressed || (clicked && contains(start_button, mouse)))
            && self.roulette.trigger()? == TriggerOutcome::Exhausted
        {
            self.notice_open = true;
        }

        let mut d = rl.begin_drawing(thread);
        d.clear_background(Color::BLACK);

        self.draw_image(&mut d, screen_width, screen_height);
        let enabled = self.roulette.state() != RouletteState::Animating && !self.notice_open;
        draw_button(&mut d, start_button, "Start", enabled);

        if self.notice_open {
            draw_notice(&mut d, screen_width, screen_height, ok_button);
        }

        Ok(true)
    }

    fn draw_image(&self, d: &mut RaylibDrawHandle, screen_width: f32, screen_height: f32) {
        let Some(texture) = self.textures.get(self.shown) else {
            return;
        };

        let area_height = screen_height - BUTTON_HEIGHT - 2.0 * BUTTON_MARGIN;
        let tex_width = texture.width() as f32;
        let tex_height = texture.height() as f32;
        let scale = fit_scale(tex_width, tex_height, screen_width, area_height);

        let scaled_width = tex_width * scale;
        let scaled_height = tex_height * scale;

        d.draw_texture_pro(
            texture,
            Rectangle::new(0.0, 0.0, tex_width, tex_height),
            Rectangle::new(
                (screen_width - scaled_width) * 0.5,
                (area_height - scaled_height) * 0.5,
                scaled_width,
                scaled_height,
            ),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
    }
}

fn draw_button(d: &mut RaylibDrawHandle, rect: Rectangle, label: &str, enabled: bool) {
    let (fill, text) = if enabled {
        (Color::RAYWHITE, Color::BLACK)
    } else {
        (Color::DARKGRAY, Color::GRAY)
    };
    d.draw_rectangle_rec(rect, fill);
    d.draw_rectangle_lines_ex(rect, 2.0, Color::GRAY);

    let text_width = measure_text(label, BUTTON_FONT_SIZE);
    d.draw_text(
        label,
        (rect.x + (rect.width - text_width as f32) * 0.5) as i32,
        (rect.y + (rect.height - BUTTON_FONT_SIZE as f32) * 0.5) as i32,
        BUTTON_FONT_SIZE,
        text,
    );
}

fn draw_notice(d: &mut RaylibDrawHandle, screen_width: f32, screen_height: f32, ok_button: Rectangle) {
    d.draw_rectangle(0, 0, screen_width as i32, screen_height as i32, Color::new(0, 0, 0, 180));

    let text_width = measure_text(EXHAUSTED_NOTICE, NOTICE_FONT_SIZE) as f32;
    let panel_width = text_width + 4.0 * BUTTON_MARGIN;
    let panel = Rectangle::new(
        (screen_width - panel_width) * 0.5,
        screen_height * 0.5 - NOTICE_FONT_SIZE as f32 - 3.0 * BUTTON_MARGIN,
        panel_width,
        NOTICE_FONT_SIZE as f32 + BUTTON_HEIGHT + 6.0 * BUTTON_MARGIN,
    );
    d.draw_rectangle_rec(panel, Color::new(40, 40, 40, 255));
    d.draw_rectangle_lines_ex(panel, 2.0, Color::LIGHTGRAY);

    d.draw_text(
        EXHAUSTED_NOTICE,
        ((screen_width - text_width) * 0.5) as i32,
        (screen_height * 0.5 - NOTICE_FONT_SIZE as f32 - BUTTON_MARGIN) as i32,
        NOTICE_FONT_SIZE,
        Color::RAYWHITE,
    );
    draw_button(d, ok_button, "OK", true);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_large_images_shrink_to_fit() {
        let scale = fit_scale(4000.0, 1000.0, 1000.0, 1000.0);
        assert!((scale - 1000.0 * IMAGE_FILL / 4000.0).abs() < 1e-6);

        let portrait = fit_scale(500.0, 2000.0, 1000.0, 600.0);
        assert!((portrait - 600.0 * IMAGE_FILL / 2000.0).abs() < 1e-6);
    }

    #[test]
    fn test_small_images_are_not_upscaled() {
        assert_eq!(fit_scale(100.0, 80.0, 1000.0, 600.0), 1.0);
        assert_eq!(fit_scale(0.0, 80.0, 1000.0, 600.0), 1.0);
    }

    #[test]
    fn test_start_button_sits_at_the_bottom() {
        let rect = start_button_rect(800.0, 600.0);
        assert_eq!(rect.x, (800.0 - BUTTON_WIDTH) * 0.5);
        assert_eq!(rect.y + rect.height + BUTTON_MARGIN, 600.0);
    }

    #[test]
    fn test_hit_test() {
        let rect = Rectangle::new(10.0, 20.0, 100.0, 50.0);
        assert!(contains(rect, Vector2::new(10.0, 20.0)));
        assert!(contains(rect, Vector2::new(60.0, 45.0)));
        assert!(contains(rect, Vector2::new(110.0, 70.0)));
        assert!(!contains(rect, Vector2::new(9.9, 45.0)));
        assert!(!contains(rect, Vector2::new(60.0, 70.5)));
    }
}
