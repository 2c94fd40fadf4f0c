//! Small reusable widgets: item-type badges, copy buttons, logo cache and toast.

use std::collections::HashMap;

use arboard::Clipboard;
use eframe::egui;
use shared::domain::ItemType;

use crate::controller::events::LogoImage;

pub const LOGO_SIZE: f32 = 16.0;
const TOAST_SECONDS: f64 = 2.0;

pub fn item_type_badge(ui: &mut egui::Ui, item_type: &ItemType) {
    if !item_type.shows_badge() {
        return;
    }
    let (fill, text) = match item_type {
        ItemType::Vm => (egui::Color32::from_rgb(0x4c, 0x1d, 0x95), "VM"),
        ItemType::Lxc => (egui::Color32::from_rgb(0x1e, 0x3a, 0x8a), "LXC"),
        _ => (ui.visuals().widgets.inactive.bg_fill, ""),
    };
    egui::Frame::new()
        .fill(fill)
        .corner_radius(4.0)
        .inner_margin(egui::Margin::symmetric(4, 0))
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new(text)
                    .small()
                    .color(egui::Color32::WHITE),
            );
        });
}

pub fn count_badge(ui: &mut egui::Ui, count: usize) {
    egui::Frame::new()
        .fill(ui.visuals().faint_bg_color)
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(6, 0))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(count.to_string()).small());
        });
}

/// Monospace button; returns `true` when clicked.
pub fn copy_button(ui: &mut egui::Ui, text: &str) -> bool {
    ui.add(egui::Button::new(egui::RichText::new(text).monospace()))
        .on_hover_text("Click to copy")
        .clicked()
}

pub fn write_clipboard_text(text: &str) -> Result<(), String> {
    let mut clipboard = Clipboard::new().map_err(|err| err.to_string())?;
    clipboard
        .set_text(text.to_string())
        .map_err(|err| err.to_string())
}

enum LogoSlot {
    Pending,
    Ready(egui::TextureHandle),
    Failed,
}

/// Textures for script logos, keyed by URL. Each URL is requested at most once.
#[derive(Default)]
pub struct LogoCache {
    slots: HashMap<String, LogoSlot>,
    requests: Vec<String>,
}

impl LogoCache {
    /// Returns the texture if ready; otherwise queues a fetch the first time `url` is seen.
    pub fn texture(&mut self, url: &str) -> Option<egui::TextureHandle> {
        if url.is_empty() {
            return None;
        }
        match self.slots.get(url) {
            Some(LogoSlot::Ready(texture)) => Some(texture.clone()),
            Some(LogoSlot::Pending | LogoSlot::Failed) => None,
            None => {
                self.slots.insert(url.to_string(), LogoSlot::Pending);
                self.requests.push(url.to_string());
                None
            }
        }
    }

    pub fn take_requests(&mut self) -> Vec<String> {
        std::mem::take(&mut self.requests)
    }

    pub fn insert_loaded(&mut self, ctx: &egui::Context, url: String, image: &LogoImage) {
        let color_image =
            egui::ColorImage::from_rgba_unmultiplied([image.width, image.height], &image.rgba);
        let texture = ctx.load_texture(
            format!("script-logo:{url}"),
            color_image,
            egui::TextureOptions::LINEAR,
        );
        self.slots.insert(url, LogoSlot::Ready(texture));
    }

    pub fn mark_failed(&mut self, url: String) {
        self.slots.insert(url, LogoSlot::Failed);
    }

    /// Forget failures so the next frame retries them (used by Reload).
    pub fn forget_failures(&mut self) {
        self.slots
            .retain(|_, slot| !matches!(slot, LogoSlot::Failed));
    }

    pub fn is_pending(&self, url: &str) -> bool {
        matches!(self.slots.get(url), Some(LogoSlot::Pending))
    }
}

pub fn logo_image(ui: &mut egui::Ui, texture: &egui::TextureHandle, size: f32) {
    ui.add(egui::Image::new(texture).fit_to_exact_size(egui::vec2(size, size)));
}

/// A transient message drawn over the bottom-right corner.
#[derive(Default)]
pub struct Toast {
    current: Option<(String, f64)>,
}

impl Toast {
    pub fn show_message(&mut self, message: impl Into<String>, now: f64) {
        self.current = Some((message.into(), now + TOAST_SECONDS));
    }

    pub fn message(&self, now: f64) -> Option<&str> {
        match &self.current {
            Some((message, expires_at)) if now < *expires_at => Some(message),
            _ => None,
        }
    }

    pub fn draw(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|input| input.time);
        let Some(message) = self.message(now).map(str::to_string) else {
            self.current = None;
            return;
        };
        egui::Area::new(egui::Id::new("copy_toast"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
            .order(egui::Order::Tooltip)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(message);
                });
            });
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}

#[cfg(test)]
#[path = "tests/widgets_tests.rs"]
mod tests;
