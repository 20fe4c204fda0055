use shared_types::{LatLng, LocationCategory, LocationRecord};

use crate::provider::{CanvasOptions, MapProvider, ProviderError, ProviderReadiness};

use super::{
    map_marker::{destination_circle, marker_options},
    map_marker_popup::popup_content,
};

pub const MAP_ZOOM: f64 = 12.0;

pub const NO_LOCATIONS_MESSAGE: &str = "No locations to display.";
pub const MISSING_KEY_MESSAGE: &str = "Map unavailable: Google Maps API key is not configured.";
pub const LOADING_MESSAGE: &str = "Loading map...";

/// Everything the map shows instead of a canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum MapPlaceholder {
    NoLocations,
    MissingCredential,
    LoadFailed(String),
    Loading,
}

impl MapPlaceholder {
    pub fn message(&self) -> String {
        match self {
            MapPlaceholder::NoLocations => NO_LOCATIONS_MESSAGE.to_string(),
            MapPlaceholder::MissingCredential => MISSING_KEY_MESSAGE.to_string(),
            MapPlaceholder::LoadFailed(reason) => format!("Failed to load Google Maps: {reason}"),
            MapPlaceholder::Loading => LOADING_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapRenderState {
    Placeholder(MapPlaceholder),
    Ready(Vec<LocationRecord>),
}

impl MapRenderState {
    /// Checks, in order: data, credential, load error, loading.
    pub fn resolve(
        payload: Option<&str>,
        api_key: Option<&str>,
        readiness: &ProviderReadiness,
    ) -> Self {
        let records = parse_locations(payload);
        if records.is_empty() {
            return MapRenderState::Placeholder(MapPlaceholder::NoLocations);
        }
        if api_key.map_or(true, |key| key.trim().is_empty()) {
            return MapRenderState::Placeholder(MapPlaceholder::MissingCredential);
        }
        match readiness {
            ProviderReadiness::Failed(reason) => {
                MapRenderState::Placeholder(MapPlaceholder::LoadFailed(reason.clone()))
            }
            ProviderReadiness::Loading => MapRenderState::Placeholder(MapPlaceholder::Loading),
            ProviderReadiness::Ready => MapRenderState::Ready(records),
        }
    }

    pub fn placeholder(&self) -> Option<MapPlaceholder> {
        match self {
            MapRenderState::Placeholder(placeholder) => Some(placeholder.clone()),
            MapRenderState::Ready(_) => None,
        }
    }
}

/// Decodes the serialized record list. Anything unreadable is no data.
pub fn parse_locations(payload: Option<&str>) -> Vec<LocationRecord> {
    let Some(payload) = payload.filter(|payload| !payload.trim().is_empty()) else {
        return Vec::new();
    };
    match LocationRecord::parse_list(payload) {
        Ok(records) => records,
        Err(err) => {
            leptos::logging::warn!("Ignoring malformed locations payload: {}", err);
            Vec::new()
        }
    }
}

struct PlacedMarker<P: MapProvider> {
    marker: P::Marker,
    listener: Option<P::Listener>,
}

/// Provider objects owned by one mounted map.
///
/// `render` always tears the previous marker set down before building the
/// next, so at most one set is live on the canvas.
pub struct LocationMapState<P: MapProvider> {
    provider: P,
    /// Container the current canvas was drawn into.
    mount: Option<P::Mount>,
    canvas: Option<P::Canvas>,
    popup: Option<P::Popup>,
    markers: Vec<PlacedMarker<P>>,
    circles: Vec<P::Circle>,
    disposed: bool,
}

impl<P: MapProvider> LocationMapState<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            mount: None,
            canvas: None,
            popup: None,
            markers: Vec::new(),
            circles: Vec::new(),
            disposed: false,
        }
    }

    #[cfg(test)]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    #[cfg(test)]
    pub fn has_canvas(&self) -> bool {
        self.canvas.is_some()
    }

    pub fn render(&mut self, mount: &P::Mount, records: &[LocationRecord]) {
        if self.disposed {
            return;
        }
        // A canvas drawn into another container is no longer visible.
        if self.mount.as_ref().is_some_and(|current| current != mount) {
            self.release();
        } else {
            self.teardown();
        }

        let Some(first) = records.first() else {
            return;
        };
        let origin = first.coordinates;

        let (canvas, popup) = match self.prepare_canvas(mount, origin) {
            Ok(handles) => handles,
            Err(err) => {
                leptos::logging::error!("Failed to set up map canvas: {}", err);
                return;
            }
        };

        for (index, record) in records.iter().enumerate() {
            if let Err(err) = self.place_record(&canvas, &popup, origin, record) {
                leptos::logging::error!(
                    "Skipping location #{} ({}): {}",
                    index,
                    record.address,
                    err
                );
            }
        }
    }

    /// Detaches markers, circles and listeners and closes the popup.
    /// The canvas stays for the next `render`.
    pub fn teardown(&mut self) {
        if let Some(popup) = &self.popup {
            self.provider.close_popup(popup);
        }
        for placed in self.markers.drain(..) {
            if let Some(listener) = placed.listener {
                self.provider.remove_listener(listener);
            }
            self.provider.detach_marker(&placed.marker);
        }
        for circle in self.circles.drain(..) {
            self.provider.detach_circle(&circle);
        }
    }

    /// Tears down and forgets the canvas, e.g. when its container goes away.
    pub fn release(&mut self) {
        self.teardown();
        self.popup = None;
        self.canvas = None;
        self.mount = None;
    }

    /// Final release at unmount. Later `render` calls do nothing.
    pub fn dispose(&mut self) {
        self.release();
        self.disposed = true;
    }

    fn prepare_canvas(
        &mut self,
        mount: &P::Mount,
        center: LatLng,
    ) -> Result<(P::Canvas, P::Popup), ProviderError> {
        let options = CanvasOptions {
            center,
            zoom: MAP_ZOOM,
        };

        let canvas = match &self.canvas {
            Some(canvas) => {
                self.provider.recenter(canvas, &options);
                canvas.clone()
            }
            None => {
                let canvas = self.provider.create_canvas(mount, &options)?;
                self.mount = Some(mount.clone());
                self.canvas = Some(canvas.clone());
                canvas
            }
        };

        let popup = match &self.popup {
            Some(popup) => popup.clone(),
            None => {
                let popup = self.provider.create_popup()?;
                self.popup = Some(popup.clone());
                popup
            }
        };

        Ok((canvas, popup))
    }

    fn place_record(
        &mut self,
        canvas: &P::Canvas,
        popup: &P::Popup,
        origin: LatLng,
        record: &LocationRecord,
    ) -> Result<(), ProviderError> {
        let marker = self
            .provider
            .create_marker(canvas, &marker_options(record))?;
        self.markers.push(PlacedMarker {
            marker: marker.clone(),
            listener: None,
        });

        let content = popup_content(record);
        let provider = self.provider.clone();
        let canvas_for_click = canvas.clone();
        let popup_for_click = popup.clone();
        let anchor = marker.clone();
        let listener = self.provider.on_marker_click(
            &marker,
            Box::new(move || {
                provider.close_popup(&popup_for_click);
                if let Err(err) = provider.set_popup_content(&popup_for_click, &content) {
                    leptos::logging::error!("Failed to fill popup: {}", err);
                    return;
                }
                provider.open_popup(&popup_for_click, &canvas_for_click, &anchor);
            }),
        )?;
        if let Some(placed) = self.markers.last_mut() {
            placed.listener = Some(listener);
        }

        if record.category == LocationCategory::Destination {
            // Ring is centered on the first record, not on the destination.
            let circle = self
                .provider
                .create_circle(canvas, &destination_circle(record, origin))?;
            self.circles.push(circle);
        }

        Ok(())
    }
}
