//! A [`MapProvider`] that records every call instead of drawing anything.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use shared_types::LatLng;

use super::{
    CanvasOptions, CircleOptions, MapProvider, MarkerOptions, PlaceResult, PopupContent,
    ProviderError, SearchOptions,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CanvasCreated { canvas: Handle, mount: Handle, center: LatLng, zoom: f64 },
    Recentered { canvas: Handle, center: LatLng },
    MarkerCreated { marker: Handle, options: MarkerOptions },
    MarkerDetached(Handle),
    PopupCreated(Handle),
    PopupContentSet { popup: Handle, content: PopupContent },
    PopupOpened { popup: Handle, anchor: Handle },
    PopupClosed(Handle),
    CircleCreated { circle: Handle, options: CircleOptions },
    CircleDetached(Handle),
    SearchCreated { behavior: Handle, options: SearchOptions },
    SearchCleared(Handle),
    ListenerAdded { listener: Handle, target: Handle },
    ListenerRemoved(Handle),
}

enum Handler {
    Click(Box<dyn FnMut()>),
    Place(Box<dyn FnMut(PlaceResult)>),
}

struct Registration {
    target: Handle,
    handler: Option<Handler>,
}

#[derive(Default)]
struct Recorder {
    next_id: usize,
    calls: Vec<Call>,
    listeners: HashMap<Handle, Registration>,
    failing_titles: Vec<String>,
    fail_canvas: bool,
}

impl Recorder {
    fn next(&mut self) -> Handle {
        self.next_id += 1;
        Handle(self.next_id)
    }
}

#[derive(Clone, Default)]
pub struct RecordingProvider {
    inner: Rc<RefCell<Recorder>>,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markers whose title contains `needle` fail to construct.
    pub fn fail_markers_titled(&self, needle: &str) {
        self.inner.borrow_mut().failing_titles.push(needle.to_string());
    }

    pub fn fail_canvas(&self) {
        self.inner.borrow_mut().fail_canvas = true;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.borrow_mut().calls.clear();
    }

    pub fn created_objects(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| {
                matches!(
                    call,
                    Call::CanvasCreated { .. }
                        | Call::MarkerCreated { .. }
                        | Call::PopupCreated(_)
                        | Call::CircleCreated { .. }
                        | Call::SearchCreated { .. }
                )
            })
            .count()
    }

    pub fn markers_created(&self) -> Vec<(Handle, MarkerOptions)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::MarkerCreated { marker, options } => Some((marker, options)),
                _ => None,
            })
            .collect()
    }

    pub fn circles_created(&self) -> Vec<CircleOptions> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::CircleCreated { options, .. } => Some(options),
                _ => None,
            })
            .collect()
    }

    pub fn live_listeners(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Fires every click handler registered on `marker`.
    pub fn click(&self, marker: Handle) {
        let ids: Vec<Handle> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .filter(|(_, registration)| registration.target == marker)
            .map(|(id, _)| *id)
            .collect();
        for id in ids {
            let handler = self
                .inner
                .borrow_mut()
                .listeners
                .get_mut(&id)
                .and_then(|registration| registration.handler.take());
            match handler {
                Some(Handler::Click(mut handler)) => {
                    handler();
                    self.restore(id, Handler::Click(handler));
                }
                Some(other) => self.restore(id, other),
                None => {}
            }
        }
    }

    /// Reports `place` from the search behavior `behavior`.
    pub fn choose_place(&self, behavior: Handle, place: PlaceResult) {
        let ids: Vec<Handle> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .filter(|(_, registration)| registration.target == behavior)
            .map(|(id, _)| *id)
            .collect();
        for id in ids {
            let handler = self
                .inner
                .borrow_mut()
                .listeners
                .get_mut(&id)
                .and_then(|registration| registration.handler.take());
            match handler {
                Some(Handler::Place(mut handler)) => {
                    handler(place.clone());
                    self.restore(id, Handler::Place(handler));
                }
                Some(other) => self.restore(id, other),
                None => {}
            }
        }
    }

    fn restore(&self, id: Handle, handler: Handler) {
        if let Some(registration) = self.inner.borrow_mut().listeners.get_mut(&id) {
            registration.handler = Some(handler);
        }
    }

    fn record(&self, call: Call) {
        self.inner.borrow_mut().calls.push(call);
    }

    fn register(&self, target: Handle, handler: Handler) -> Handle {
        let mut recorder = self.inner.borrow_mut();
        let listener = recorder.next();
        recorder.listeners.insert(
            listener,
            Registration {
                target,
                handler: Some(handler),
            },
        );
        recorder.calls.push(Call::ListenerAdded { listener, target });
        listener
    }
}

impl MapProvider for RecordingProvider {
    type Mount = Handle;
    type Field = ();
    type Canvas = Handle;
    type Marker = Handle;
    type Popup = Handle;
    type Circle = Handle;
    type SearchBehavior = Handle;
    type Listener = Handle;

    fn create_canvas(&self, mount: &Handle, options: &CanvasOptions) -> Result<Handle, ProviderError> {
        if self.inner.borrow().fail_canvas {
            return Err(ProviderError::Unavailable);
        }
        let canvas = self.inner.borrow_mut().next();
        self.record(Call::CanvasCreated {
            canvas,
            mount: *mount,
            center: options.center,
            zoom: options.zoom,
        });
        Ok(canvas)
    }

    fn create_marker(
        &self,
        _canvas: &Handle,
        options: &MarkerOptions,
    ) -> Result<Handle, ProviderError> {
        let fails = self
            .inner
            .borrow()
            .failing_titles
            .iter()
            .any(|needle| options.title.contains(needle.as_str()));
        if fails {
            return Err(ProviderError::Construction {
                object: "marker",
                message: format!("rejected {}", options.title),
            });
        }
        let marker = self.inner.borrow_mut().next();
        self.record(Call::MarkerCreated {
            marker,
            options: options.clone(),
        });
        Ok(marker)
    }

    fn create_popup(&self) -> Result<Handle, ProviderError> {
        let popup = self.inner.borrow_mut().next();
        self.record(Call::PopupCreated(popup));
        Ok(popup)
    }

    fn create_circle(
        &self,
        _canvas: &Handle,
        options: &CircleOptions,
    ) -> Result<Handle, ProviderError> {
        let circle = self.inner.borrow_mut().next();
        self.record(Call::CircleCreated {
            circle,
            options: options.clone(),
        });
        Ok(circle)
    }

    fn create_search_behavior(
        &self,
        _field: &(),
        options: &SearchOptions,
    ) -> Result<Handle, ProviderError> {
        let behavior = self.inner.borrow_mut().next();
        self.record(Call::SearchCreated {
            behavior,
            options: options.clone(),
        });
        Ok(behavior)
    }

    fn recenter(&self, canvas: &Handle, options: &CanvasOptions) {
        self.record(Call::Recentered {
            canvas: *canvas,
            center: options.center,
        });
    }

    fn on_marker_click(
        &self,
        marker: &Handle,
        handler: Box<dyn FnMut()>,
    ) -> Result<Handle, ProviderError> {
        Ok(self.register(*marker, Handler::Click(handler)))
    }

    fn on_place_changed(
        &self,
        behavior: &Handle,
        handler: Box<dyn FnMut(PlaceResult)>,
    ) -> Result<Handle, ProviderError> {
        Ok(self.register(*behavior, Handler::Place(handler)))
    }

    fn remove_listener(&self, listener: Handle) {
        self.inner.borrow_mut().listeners.remove(&listener);
        self.record(Call::ListenerRemoved(listener));
    }

    fn detach_marker(&self, marker: &Handle) {
        self.record(Call::MarkerDetached(*marker));
    }

    fn detach_circle(&self, circle: &Handle) {
        self.record(Call::CircleDetached(*circle));
    }

    fn set_popup_content(&self, popup: &Handle, content: &PopupContent) -> Result<(), ProviderError> {
        self.record(Call::PopupContentSet {
            popup: *popup,
            content: content.clone(),
        });
        Ok(())
    }

    fn open_popup(&self, popup: &Handle, _canvas: &Handle, anchor: &Handle) {
        self.record(Call::PopupOpened {
            popup: *popup,
            anchor: *anchor,
        });
    }

    fn close_popup(&self, popup: &Handle) {
        self.record(Call::PopupClosed(*popup));
    }

    fn clear_search_behavior(&self, behavior: Handle) {
        self.inner
            .borrow_mut()
            .listeners
            .retain(|_, registration| registration.target != behavior);
        self.record(Call::SearchCleared(behavior));
    }
}
