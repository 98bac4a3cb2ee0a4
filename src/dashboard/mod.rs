mod layout;

use std::time::{Duration, Instant};

use anyhow::{anyhow, Error};
use eframe::egui::{self, Color32, RichText};
use log::info;

pub use layout::PanelLayout;

use crate::{
    channel::Channel,
    config::{Config, FadeSettings},
    driver::PwmDriver,
    fade::FadeTicker,
    lights::LightController,
    slider::ManualSlider,
};

const LABEL_SIZE: f32 = 11.0;
const BUTTON_SIZE: f32 = 12.0;

/// The window. Owns the lights, the sliders and the fade ticker, so closing
/// it releases the hardware.
pub struct ControlPanel<D: PwmDriver> {
    lights: LightController<D>,
    sliders: Vec<ManualSlider>,
    ticker: Option<FadeTicker>,
}

impl<D: PwmDriver> ControlPanel<D> {
    pub fn new(
        lights: LightController<D>,
        layout: PanelLayout,
        fade: FadeSettings,
        now: Instant,
    ) -> Self {
        let sliders = layout.manual.into_iter().map(ManualSlider::new).collect();
        let ticker = layout
            .fade
            .map(|(a, b)| FadeTicker::new(fade, a, b, now));

        Self {
            lights,
            sliders,
            ticker,
        }
    }

    pub fn sliders(&self) -> &[ManualSlider] {
        &self.sliders
    }

    pub fn ticker(&self) -> Option<&FadeTicker> {
        self.ticker.as_ref()
    }

    /// Forward a slider move. Channels without a slider are ignored.
    pub fn slider_changed(&mut self, channel: Channel, value: u8) {
        if let Some(slider) = self.sliders.iter_mut().find(|s| s.channel() == channel) {
            slider.on_value_changed(value, &mut self.lights);
        }
    }

    /// Give the fade a chance to tick. Returns the wait until the next tick,
    /// or `None` when nothing fades.
    pub fn poll_fade(&mut self, now: Instant) -> Option<Duration> {
        let Self { lights, ticker, .. } = self;
        ticker.as_mut().map(|ticker| ticker.poll(now, lights))
    }
}

impl<D: PwmDriver> eframe::App for ControlPanel<D> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let frame = egui::Frame::none()
            .fill(Color32::BLACK)
            .inner_margin(12.0);

        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            let Self {
                lights, sliders, ..
            } = self;

            for slider in sliders.iter_mut() {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(slider.channel().label())
                            .color(Color32::WHITE)
                            .size(LABEL_SIZE),
                    );

                    let mut value = slider.value();
                    let slider_widget = egui::Slider::new(&mut value, 0..=255).show_value(false);
                    if ui.add(slider_widget).changed() {
                        slider.on_value_changed(value, lights);
                    }
                });
            }

            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                let exit = egui::Button::new(
                    RichText::new("Exit")
                        .color(Color32::WHITE)
                        .size(BUTTON_SIZE),
                )
                .fill(Color32::GRAY);

                if ui.add(exit).clicked() {
                    info!("Exit requested");
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
        });

        // Keep frames coming so the fade runs without user input
        if let Some(wait) = self.poll_fade(Instant::now()) {
            ctx.request_repaint_after(wait);
        }
    }
}

/// Open the panel and block until the window closes.
///
/// The lights are shut down when the panel is dropped, which also happens
/// if the window never opens.
pub fn run<D: PwmDriver + 'static>(
    lights: LightController<D>,
    layout: PanelLayout,
    config: &Config,
) -> Result<(), Error> {
    layout.validate()?;

    let panel = ControlPanel::new(lights, layout, config.fade, Instant::now());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window.title.clone())
            .with_inner_size([config.window.width, config.window.height])
            .with_resizable(false),
        ..Default::default()
    };

    info!("Opening {}", config.window.title);
    eframe::run_native(
        &config.window.title,
        options,
        Box::new(move |_cc| Ok(Box::new(panel))),
    )
    .map_err(|e| anyhow!("GUI failed: {}", e))?;

    info!("Window closed");
    Ok(())
}
