use crate::config::SketchConfig;
use crate::controls::{Bindings, ControlEvent, ControlId, ControlSet};
use crate::error::{SketchError, SketchResult};
use crate::export::{DEFAULT_FILE_NAME, Download, encode_png};
use crate::input::{GestureState, InputCapture, PointerEvent};
use crate::params::DrawingParams;
use crate::point::PointStore;
use crate::renderer::Renderer;
use crate::surface::{RasterSurface, SurfaceBounds};

/// One drawing session: the points, the parameters and the surface they are
/// painted onto, plus the collaborators the session talks to.
///
/// All mutation goes through `&mut self`, so a repaint always sees the state
/// exactly as the triggering operation left it.
pub struct DrawingSession {
    points: PointStore,
    params: DrawingParams,
    surface: RasterSurface,
    capture: InputCapture,
    renderer: Renderer,
    bindings: Bindings,
    bounds: Box<dyn SurfaceBounds>,
    download: Box<dyn Download>,
    file_name: String,
    revision: u64,
}

impl std::fmt::Debug for DrawingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawingSession")
            .field("points", &self.points.len())
            .field("params", &self.params)
            .field("gesture", &self.capture.state())
            .field("bindings", &self.bindings)
            .field("file_name", &self.file_name)
            .field("revision", &self.revision)
            .finish()
    }
}

impl DrawingSession {
    /// Activates a session.
    ///
    /// Fails with [`SketchError::MissingCollaborator`] when there is no
    /// surface or no save trigger. Missing optional controls just leave their
    /// feature unbound.
    pub fn new(
        surface: Option<RasterSurface>,
        controls: &ControlSet,
        bounds: Box<dyn SurfaceBounds>,
        download: Box<dyn Download>,
    ) -> SketchResult<Self> {
        let surface = surface.ok_or(SketchError::MissingCollaborator("surface"))?;
        if !controls.save {
            return Err(SketchError::MissingCollaborator("save trigger"));
        }

        log::debug!("Starting session with controls {:?}", controls);
        Ok(Self {
            points: PointStore::new(),
            params: DrawingParams::default(),
            surface,
            capture: InputCapture::new(),
            renderer: Renderer::new(),
            bindings: Bindings::for_controls(controls),
            bounds,
            download,
            file_name: DEFAULT_FILE_NAME.to_owned(),
            revision: 0,
        })
    }

    /// Builds the surface, controls and parameters described by `config`.
    pub fn from_config(
        config: &SketchConfig,
        bounds: Box<dyn SurfaceBounds>,
        download: Box<dyn Download>,
    ) -> SketchResult<Self> {
        let surface = RasterSurface::new(
            config.surface_width,
            config.surface_height,
            config.background_rgba()?,
        )?;
        Ok(Self::new(Some(surface), &config.controls, bounds, download)?
            .with_params(config.initial_params()?)
            .with_file_name(&config.file_name))
    }

    /// Replaces the starting parameters. Hosts must initialize their color and
    /// width controls from [`DrawingSession::params`] afterwards.
    pub fn with_params(mut self, params: DrawingParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_file_name(mut self, file_name: &str) -> Self {
        self.file_name = file_name.to_owned();
        self
    }

    pub fn points(&self) -> &PointStore {
        &self.points
    }

    pub fn params(&self) -> &DrawingParams {
        &self.params
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    pub fn gesture(&self) -> GestureState {
        self.capture.state()
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn is_bound(&self, control: ControlId) -> bool {
        self.bindings.is_bound(control)
    }

    /// Number of repaints performed
    pub fn repaints(&self) -> u64 {
        self.renderer.frames()
    }

    /// Bumped whenever the surface pixels change (repaint or clear)
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Feeds one pointer event through input capture, repainting if it
    /// recorded a point.
    pub fn pointer(&mut self, event: PointerEvent) {
        log::trace!("Pointer event: {:?}", event);
        if self
            .capture
            .handle(event, self.bounds.as_ref(), &mut self.points)
        {
            self.repaint();
        }
    }

    /// Delivers a control notification to whatever is bound to it.
    pub fn control(&mut self, control: ControlId, event: ControlEvent) -> SketchResult<()> {
        match self.bindings.handler_for(control, &event) {
            Some(handler) => handler(self, &event),
            None => {
                log::debug!("Ignoring {:?} from unbound control {:?}", event, control);
                Ok(())
            }
        }
    }

    pub fn repaint(&mut self) {
        self.renderer
            .repaint(&self.points, &self.params, &mut self.surface);
        self.revision += 1;
    }

    /// Switches to a new stroke color and repaints. An invalid color leaves
    /// the current one in place and does not repaint.
    pub fn set_color(&mut self, spec: &str) -> SketchResult<()> {
        let params = self.params.with_color(spec).inspect_err(|err| {
            log::warn!("{}; keeping {}", err, self.params.stroke_color().as_str());
        })?;
        self.params = params;
        self.repaint();
        Ok(())
    }

    /// Switches to the width parsed from `input` and repaints. Unparseable
    /// input leaves the current width in place and does not repaint.
    pub fn set_width(&mut self, input: &str) -> SketchResult<()> {
        let params = self.params.with_width_input(input).inspect_err(|err| {
            log::warn!("{}; keeping {}", err, self.params.stroke_width());
        })?;
        self.params = params;
        self.repaint();
        Ok(())
    }

    /// Encodes the current surface as PNG and offers it for download.
    pub fn save(&mut self) -> SketchResult<()> {
        let png = encode_png(&self.surface)?;
        self.download.download(&png, &self.file_name)?;
        log::info!("Saved drawing as {}", self.file_name);
        Ok(())
    }

    /// Clears the surface to the background and forgets every point.
    pub fn delete(&mut self) {
        self.surface.clear();
        self.surface.fill_background();
        self.points.clear();
        self.revision += 1;
        log::info!("Cleared drawing");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::DirectoryDownload;
    use crate::surface::{DEFAULT_BACKGROUND, FixedBounds};
    use egui::pos2;

    fn session(controls: ControlSet) -> SketchResult<DrawingSession> {
        DrawingSession::new(
            Some(RasterSurface::new(32, 32, DEFAULT_BACKGROUND)?),
            &controls,
            Box::new(FixedBounds::default()),
            Box::new(DirectoryDownload::new(std::env::temp_dir())),
        )
    }

    #[test]
    fn test_requires_surface() {
        let result = DrawingSession::new(
            None,
            &ControlSet::default(),
            Box::new(FixedBounds::default()),
            Box::new(DirectoryDownload::new(".")),
        );
        assert!(matches!(result, Err(SketchError::MissingCollaborator("surface"))));
    }

    #[test]
    fn test_requires_save_trigger() {
        let controls = ControlSet {
            save: false,
            ..ControlSet::default()
        };
        assert!(matches!(
            session(controls),
            Err(SketchError::MissingCollaborator("save trigger"))
        ));
    }

    #[test]
    fn test_pointer_repaints_only_on_recorded_points() {
        let mut session = session(ControlSet::default()).unwrap();

        session.pointer(PointerEvent::Move(pos2(1.0, 1.0)));
        assert_eq!(session.repaints(), 0);

        session.pointer(PointerEvent::Down(pos2(4.0, 4.0)));
        session.pointer(PointerEvent::Move(pos2(8.0, 4.0)));
        session.pointer(PointerEvent::Up);
        assert_eq!(session.repaints(), 2);
        assert_eq!(session.gesture(), GestureState::Idle);
    }

    #[test]
    fn test_unbound_color_control_is_ignored() {
        let controls = ControlSet {
            color: false,
            ..ControlSet::default()
        };
        let mut session = session(controls).unwrap();

        session
            .control(ControlId::Color, ControlEvent::Change("red".into()))
            .unwrap();
        assert_eq!(session.params().stroke_color().as_str(), "#000");
        assert_eq!(session.repaints(), 0);
    }

    #[test]
    fn test_rejected_width_keeps_previous() {
        let mut session = session(ControlSet::default()).unwrap();

        let result = session.control(ControlId::Width, ControlEvent::Change("wide".into()));
        assert!(matches!(result, Err(SketchError::InvalidWidth(_))));
        assert_eq!(session.params().stroke_width(), 5);
        assert_eq!(session.repaints(), 0);
    }

    #[test]
    fn test_delete_bumps_revision() {
        let mut session = session(ControlSet::default()).unwrap();
        session.pointer(PointerEvent::Down(pos2(4.0, 4.0)));
        let before = session.revision();

        session.control(ControlId::Delete, ControlEvent::Click).unwrap();
        assert!(session.points().is_empty());
        assert_eq!(session.revision(), before + 1);
    }
}
