use serde::{Deserialize, Serialize};

use crate::error::SketchResult;
use crate::session::DrawingSession;

/// The four controls a session can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    Save,
    Delete,
    Color,
    Width,
}

/// Notification delivered by a control.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    /// A button was activated
    Click,
    /// An input's value changed to the given text
    Change(String),
}

/// Which kind of event a binding listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Click,
    Change,
}

impl Trigger {
    fn matches(self, event: &ControlEvent) -> bool {
        matches!(
            (self, event),
            (Trigger::Click, ControlEvent::Click) | (Trigger::Change, ControlEvent::Change(_))
        )
    }
}

pub type Handler = fn(&mut DrawingSession, &ControlEvent) -> SketchResult<()>;

/// Connects one control's event to a session operation.
#[derive(Clone, Copy)]
pub struct Binding {
    control: ControlId,
    trigger: Trigger,
    handler: Handler,
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("control", &self.control)
            .field("trigger", &self.trigger)
            .finish()
    }
}

impl Binding {
    pub fn new(control: ControlId, trigger: Trigger, handler: Handler) -> Self {
        Self {
            control,
            trigger,
            handler,
        }
    }

    pub fn control(&self) -> ControlId {
        self.control
    }

    pub fn trigger(&self) -> Trigger {
        self.trigger
    }
}

/// Which controls the host actually provides.
///
/// The save trigger is required for a session to start at all; the others are
/// optional and their features are silently off when missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSet {
    pub save: bool,
    pub delete: bool,
    pub color: bool,
    pub width: bool,
}

impl Default for ControlSet {
    fn default() -> Self {
        Self {
            save: true,
            delete: true,
            color: true,
            width: true,
        }
    }
}

impl ControlSet {
    pub fn is_bound(&self, control: ControlId) -> bool {
        match control {
            ControlId::Save => self.save,
            ControlId::Delete => self.delete,
            ControlId::Color => self.color,
            ControlId::Width => self.width,
        }
    }
}

/// Binding table built once from a [`ControlSet`].
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    bindings: Vec<Binding>,
}

impl Bindings {
    pub fn for_controls(controls: &ControlSet) -> Self {
        let all = [
            Binding::new(ControlId::Save, Trigger::Click, |session, _| session.save()),
            Binding::new(ControlId::Delete, Trigger::Click, |session, _| {
                session.delete();
                Ok(())
            }),
            Binding::new(ControlId::Color, Trigger::Change, |session, event| match event {
                ControlEvent::Change(value) => session.set_color(value),
                ControlEvent::Click => Ok(()),
            }),
            Binding::new(ControlId::Width, Trigger::Change, |session, event| match event {
                ControlEvent::Change(value) => session.set_width(value),
                ControlEvent::Click => Ok(()),
            }),
        ];

        Self {
            bindings: all
                .into_iter()
                .filter(|binding| controls.is_bound(binding.control))
                .collect(),
        }
    }

    pub fn is_bound(&self, control: ControlId) -> bool {
        self.bindings.iter().any(|binding| binding.control == control)
    }

    /// Finds the handler for `event` from `control`, if anything listens for it
    pub fn handler_for(&self, control: ControlId, event: &ControlEvent) -> Option<Handler> {
        self.bindings
            .iter()
            .find(|binding| binding.control == control && binding.trigger.matches(event))
            .map(|binding| binding.handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_controls_have_no_binding() {
        let controls = ControlSet {
            color: false,
            delete: false,
            ..ControlSet::default()
        };
        let bindings = Bindings::for_controls(&controls);

        assert!(bindings.is_bound(ControlId::Save));
        assert!(bindings.is_bound(ControlId::Width));
        assert!(!bindings.is_bound(ControlId::Color));
        assert!(!bindings.is_bound(ControlId::Delete));
        assert!(
            bindings
                .handler_for(ControlId::Color, &ControlEvent::Change("red".into()))
                .is_none()
        );
    }

    #[test]
    fn test_trigger_kind_must_match() {
        let bindings = Bindings::for_controls(&ControlSet::default());

        assert!(bindings.handler_for(ControlId::Save, &ControlEvent::Click).is_some());
        assert!(bindings.handler_for(ControlId::Save, &ControlEvent::Change("x".into())).is_none());
        assert!(bindings.handler_for(ControlId::Width, &ControlEvent::Click).is_none());
    }

    #[test]
    fn test_control_set_deserializes_with_defaults() {
        let controls: ControlSet = serde_json::from_str(r#"{ "color": false }"#).unwrap();
        assert!(!controls.color);
        assert!(controls.save && controls.delete && controls.width);
    }
}
