use crate::config::SketchConfig;
use crate::controls::{ControlEvent, ControlId};
use crate::error::SketchResult;
use crate::export::DirectoryDownload;
use crate::input::PointerEvent;
use crate::panels::{central_panel, controls_panel};
use crate::params::{DrawingParams, StrokeColor};
use crate::session::DrawingSession;
use crate::surface::SharedBounds;

/// The parameters remembered between runs. The drawing itself is never stored.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
pub struct RememberedParams {
    pub stroke_color: String,
    pub stroke_width: u32,
}

impl From<&DrawingParams> for RememberedParams {
    fn from(params: &DrawingParams) -> Self {
        Self {
            stroke_color: params.stroke_color().as_str().to_owned(),
            stroke_width: params.stroke_width(),
        }
    }
}

impl RememberedParams {
    pub fn to_params(&self) -> SketchResult<DrawingParams> {
        DrawingParams::new(StrokeColor::parse(&self.stroke_color)?, self.stroke_width)
    }
}

/// Text currently shown in the color and width controls.
#[derive(Debug, Clone, Default)]
pub struct ControlInputs {
    pub color: String,
    pub width: String,
}

impl ControlInputs {
    fn from_params(params: &DrawingParams) -> Self {
        Self {
            color: params.stroke_color().as_str().to_owned(),
            width: params.stroke_width().to_string(),
        }
    }
}

pub struct SketchApp {
    session: Option<DrawingSession>,
    /// Why the session is inert, when it is
    startup_error: Option<String>,
    bounds: SharedBounds,
    inputs: ControlInputs,
    texture: Option<egui::TextureHandle>,
    uploaded_revision: Option<u64>,
    pointer_inside: bool,
    status: Option<String>,
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: SketchConfig) -> Self {
        let remembered = cc
            .storage
            .and_then(|storage| eframe::get_value::<RememberedParams>(storage, eframe::APP_KEY));
        Self::with_config(config, remembered)
    }

    /// Builds the app without a window, e.g. for tests.
    pub fn with_config(config: SketchConfig, remembered: Option<RememberedParams>) -> Self {
        let bounds = SharedBounds::default();
        let download = DirectoryDownload::new(config.download_dir.clone());

        let session =
            DrawingSession::from_config(&config, Box::new(bounds.clone()), Box::new(download)).map(
                |session| match remembered.as_ref().map(RememberedParams::to_params) {
                    Some(Ok(params)) => session.with_params(params),
                    Some(Err(err)) => {
                        log::warn!("Ignoring remembered parameters: {}", err);
                        session
                    }
                    None => session,
                },
            );

        let (session, startup_error) = match session {
            Ok(session) => (Some(session), None),
            Err(err) => {
                log::error!("Drawing disabled: {}", err);
                (None, Some(err.to_string()))
            }
        };

        // The controls must start out showing what the session draws with.
        let inputs = session
            .as_ref()
            .map(|session| ControlInputs::from_params(session.params()))
            .unwrap_or_default();

        Self {
            session,
            startup_error,
            bounds,
            inputs,
            texture: None,
            uploaded_revision: None,
            pointer_inside: false,
            status: None,
        }
    }

    pub fn session(&self) -> Option<&DrawingSession> {
        self.session.as_ref()
    }

    pub fn startup_error(&self) -> Option<&str> {
        self.startup_error.as_deref()
    }

    pub fn inputs(&self) -> &ControlInputs {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut ControlInputs {
        &mut self.inputs
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn bounds(&self) -> &SharedBounds {
        &self.bounds
    }

    pub fn is_bound(&self, control: ControlId) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.is_bound(control))
    }

    /// Forwards a control notification, reporting failures in the status line
    /// and snapping the control back to the value still in use.
    pub fn send_control(&mut self, control: ControlId, event: ControlEvent) {
        let Some(session) = &mut self.session else {
            return;
        };
        match session.control(control, event) {
            Ok(()) => {
                self.status = match control {
                    ControlId::Save => Some(format!("Saved {}", session.file_name())),
                    ControlId::Delete => Some("Cleared".to_owned()),
                    ControlId::Color | ControlId::Width => None,
                };
            }
            Err(err) => self.status = Some(err.to_string()),
        }
        self.inputs = ControlInputs::from_params(session.params());
    }

    pub fn send_pointer(&mut self, event: PointerEvent) {
        if let Some(session) = &mut self.session {
            session.pointer(event);
        }
    }

    pub(crate) fn set_pointer_inside(&mut self, inside: bool) -> bool {
        std::mem::replace(&mut self.pointer_inside, inside)
    }

    /// Uploads the surface if it changed since the last upload.
    pub(crate) fn texture(&mut self, ctx: &egui::Context) -> Option<egui::TextureHandle> {
        let session = self.session.as_ref()?;
        if self.uploaded_revision != Some(session.revision()) || self.texture.is_none() {
            let image = session.surface().to_color_image();
            match &mut self.texture {
                Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
                None => {
                    self.texture = Some(ctx.load_texture(
                        "sketch_surface",
                        image,
                        egui::TextureOptions::NEAREST,
                    ))
                }
            }
            self.uploaded_revision = Some(session.revision());
        }
        self.texture.clone()
    }
}

impl eframe::App for SketchApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Some(session) = &self.session {
            eframe::set_value(storage, eframe::APP_KEY, &RememberedParams::from(session.params()));
        }
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        controls_panel(self, ctx);
        central_panel(self, ctx);
    }
}
