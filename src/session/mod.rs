//! Annotation session: one source image, its view and everything drawn on it.
//!
//! Every change of view geometry goes through [`Session::refresh`], which runs
//! in a fixed order: fit the view transform, migrate stored point positions,
//! draw the annotations onto a fresh preview, swap the preview in, rebuild the
//! pivot panel text.

use crate::annotation::AnnotationGraph;
use crate::config::Config;
use crate::draw::{
    AnnotationStyle, Color, RenderError, RenderTarget, render_annotations, rgba_from_surface,
    surface_from_rgba,
};
use crate::geometry::Point;
use crate::image_io::{ExportFormat, ImageError, ImageSource, SourceImage, save_raster};
use crate::input::{ContextAction, Effects, InputState, Mode, PointerEvent};
use crate::view::{FIT_ZOOM, ViewTransform};
use image::RgbaImage;
use image::imageops::{self, FilterType};
use std::path::Path;


/// Loaded image plus the state derived from it.
struct LoadedImage {
    source: SourceImage,
    view: ViewTransform,
    preview: RgbaImage,
}

/// State of one annotation window.
pub struct Session {
    config: Config,
    style: AnnotationStyle,
    image: Option<LoadedImage>,
    graph: AnnotationGraph,
    input: InputState,
    pivot_text: String,
    zoom: u32,
    viewport: (u32, u32),
}

impl Session {
    pub fn new(config: Config) -> Self {
        let style = AnnotationStyle::from_config(&config);
        let input = InputState::new(&config);
        let viewport = (config.view.viewport[0], config.view.viewport[1]);
        let zoom = FIT_ZOOM.clamp(config.view.min_zoom, config.view.max_zoom);
        Self {
            config,
            style,
            image: None,
            graph: AnnotationGraph::new(),
            input,
            pivot_text: String::new(),
            zoom,
            viewport,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn graph(&self) -> &AnnotationGraph {
        &self.graph
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn view(&self) -> Option<&ViewTransform> {
        self.image.as_ref().map(|image| &image.view)
    }

    /// View-sized bitmap with the annotations drawn on it.
    pub fn preview(&self) -> Option<&RgbaImage> {
        self.image.as_ref().map(|image| &image.preview)
    }

    /// DICOM metadata block of the loaded image.
    pub fn metadata(&self) -> Option<&str> {
        self.image.as_ref().and_then(|image| image.source.metadata.as_deref())
    }

    /// Pivot panel text: `index: (x, y)` in source pixels, one point per line.
    pub fn pivot_info(&self) -> &str {
        &self.pivot_text
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Replaces the current image and drops every annotation.
    ///
    /// A failed load is logged and leaves the session untouched.
    pub fn load_image(&mut self, loader: &dyn ImageSource, path: &Path) -> Result<(), ImageError> {
        let source = match loader.load(path) {
            Ok(source) => source,
            Err(err) => {
                log::warn!("{err}");
                return Err(err);
            }
        };
        self.open_image(source);
        Ok(())
    }

    /// Installs an already decoded image.
    pub fn open_image(&mut self, source: SourceImage) {
        let view = ViewTransform::new(source.dimensions(), self.config.view.frame_width);
        let preview = source.raster.clone();
        self.image = Some(LoadedImage {
            source,
            view,
            preview,
        });
        self.input.reset();
        self.graph.clear();
        self.graph.set_active(true);
        self.zoom = FIT_ZOOM.clamp(self.config.view.min_zoom, self.config.view.max_zoom);
        self.refresh();
    }

    /// Drops the image and all annotations.
    pub fn close_image(&mut self) {
        self.image = None;
        self.input.reset();
        self.graph.set_active(false);
        self.pivot_text.clear();
        log::info!("Image closed");
    }

    /// Erases every annotation but keeps the image.
    pub fn clear_annotations(&mut self) {
        if self.image.is_none() {
            return;
        }
        self.input.abandon(&mut self.graph);
        self.input.reset();
        self.graph.clear();
        self.redraw();
    }

    /// The widget was resized.
    pub fn resize(&mut self, viewport: (u32, u32)) {
        self.viewport = viewport;
        self.refresh();
    }

    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(self.zoom.saturating_add(self.config.view.zoom_step))
    }

    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(self.zoom.saturating_sub(self.config.view.zoom_step))
    }

    pub fn reset_zoom(&mut self) -> bool {
        self.set_zoom(FIT_ZOOM)
    }

    /// Sets the zoom percent, clamped to the configured range.
    ///
    /// Returns whether the zoom changed.
    pub fn set_zoom(&mut self, percent: u32) -> bool {
        let percent = percent.clamp(self.config.view.min_zoom, self.config.view.max_zoom);
        if percent == self.zoom {
            return false;
        }
        self.zoom = percent;
        self.refresh();
        true
    }

    pub fn set_mode(&mut self, mode: Mode) -> bool {
        let changed = self.input.set_mode(mode, &mut self.graph);
        if changed {
            self.redraw();
        }
        changed
    }

    pub fn mode(&self) -> Mode {
        self.input.mode()
    }

    pub fn set_color(&mut self, color: Color) {
        self.input.set_color(color);
    }

    /// Selects a palette color by position or by label; unknown entries are ignored.
    pub fn select_color(&mut self, label: &str) -> bool {
        let by_position = label
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|position| self.config.palette().get(position).copied());
        match by_position.or_else(|| self.config.palette_color(label)) {
            Some(color) => {
                self.input.set_color(color);
                true
            }
            None => {
                log::warn!("Unknown color '{label}'");
                false
            }
        }
    }

    pub fn current_color(&self) -> Color {
        self.input.current_color
    }

    /// Feeds a pointer event given in widget coordinates.
    pub fn on_pointer_event(&mut self, event: PointerEvent) -> Effects {
        let Some(image) = self.image.as_ref() else {
            return Effects::default();
        };
        let view = image.view.clone();
        let event = event.with_position(view.widget_to_view(event.position()));
        let effects = self.input.on_pointer_event(event, &mut self.graph, &view);
        if effects.redraw {
            self.redraw();
        }
        effects
    }

    /// Applies a context-menu action; rejected renames are logged and ignored.
    ///
    /// The construction in progress is abandoned first, so no armed index
    /// outlives an erase or rename.
    pub fn apply_context_action(&mut self, index: usize, action: ContextAction) -> bool {
        let abandoned = self.input.abandon(&mut self.graph);
        let changed = match self
            .input
            .apply_context_action(index, action, &mut self.graph)
        {
            Ok(changed) => changed,
            Err(err) => {
                log::warn!("{err}");
                false
            }
        };
        if changed || abandoned {
            self.redraw();
        }
        changed
    }

    /// Index of the point under a widget position.
    pub fn point_at_widget(&self, position: Point) -> Option<usize> {
        let image = self.image.as_ref()?;
        let position = image.view.widget_to_view(position);
        self.graph
            .point_at(position, self.input.hit_radius(), &self.style.kernel)
    }

    /// Renders the annotations at source resolution and writes them to `path`.
    ///
    /// Abandons any construction in progress first. Without an image nothing
    /// is written and `Ok(None)` is returned.
    pub fn export(&mut self, path: &Path) -> Result<Option<ExportFormat>, ImageError> {
        if self.image.is_none() {
            return Ok(None);
        }
        ExportFormat::from_path(path)?;
        if self.input.abandon(&mut self.graph) {
            self.input.reset();
            self.redraw();
        }
        let Some(image) = self.image.as_ref() else {
            return Ok(None);
        };

        let mut surface = surface_from_rgba(&image.source.raster)?;
        {
            let ctx = cairo::Context::new(&surface).map_err(RenderError::from)?;
            render_annotations(
                &ctx,
                &self.graph,
                &image.view,
                &self.style,
                RenderTarget::Export,
            )?;
        }
        let raster = rgba_from_surface(&mut surface)?;
        let format = save_raster(&raster, path)?;
        Ok(Some(format))
    }

    /// Refits the view and redraws everything derived from it.
    fn refresh(&mut self) {
        let Some(image) = self.image.as_mut() else {
            return;
        };
        let ratio = image.view.fit(self.viewport, self.zoom);
        self.graph.rescale(ratio);
        self.redraw();
    }

    /// Redraws the preview and the pivot panel without touching the view.
    fn redraw(&mut self) {
        let Some(image) = self.image.as_ref() else {
            return;
        };
        match draw_preview(image, &self.graph, &self.style, &self.input) {
            Ok(preview) => {
                if let Some(image) = self.image.as_mut() {
                    image.preview = preview;
                }
            }
            Err(err) => log::error!("Failed to draw preview: {err}"),
        }
        self.update_pivot_text();
    }

    fn update_pivot_text(&mut self) {
        self.pivot_text = match self.image.as_ref() {
            Some(image) => self
                .graph
                .pivot_listing(|p| image.view.to_source(p), self.style.precision),
            None => String::new(),
        };
    }
}

/// Scales the source to the view size and draws the annotations on it.
fn draw_preview(
    image: &LoadedImage,
    graph: &AnnotationGraph,
    style: &AnnotationStyle,
    input: &InputState,
) -> Result<RgbaImage, RenderError> {
    let (width, height) = image.view.image_size();
    let base = imageops::resize(&image.source.raster, width, height, FilterType::Triangle);
    let mut surface = surface_from_rgba(&base)?;
    {
        let ctx = cairo::Context::new(&surface)?;
        render_annotations(
            &ctx,
            graph,
            &image.view,
            style,
            RenderTarget::Preview { input },
        )?;
    }
    rgba_from_surface(&mut surface)
}
