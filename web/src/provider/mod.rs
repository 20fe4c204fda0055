//! The mapping provider seen by the components.
//!
//! Components never touch the provider namespace directly; they drive a
//! [`MapProvider`] and hold the handles it returns. The browser build uses
//! [`google::GoogleMaps`], tests use a recording double.

pub mod google;
pub mod loader;

#[cfg(test)]
pub mod testing;

use shared_types::LatLng;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    #[error("mapping library is not available")]
    Unavailable,
    #[error("failed to create {object}: {message}")]
    Construction {
        object: &'static str,
        message: String,
    },
    #[error("failed to register listener: {0}")]
    Listener(String),
}

/// Load state of the provider script, handed to each component.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ProviderReadiness {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasOptions {
    pub center: LatLng,
    pub zoom: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerIcon {
    pub url: String,
    pub size: (f64, f64),
    pub anchor: (f64, f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerOptions {
    pub position: LatLng,
    pub title: String,
    pub icon: MarkerIcon,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleOptions {
    pub center: LatLng,
    /// Meters.
    pub radius: f64,
    pub stroke_color: &'static str,
    pub stroke_opacity: f64,
    pub stroke_weight: f64,
    pub fill_color: &'static str,
    pub fill_opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    #[cfg(test)]
    pub fn contains(&self, point: LatLng) -> bool {
        (self.south_west.lat..=self.north_east.lat).contains(&point.lat)
            && (self.south_west.lng..=self.north_east.lng).contains(&point.lng)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub bounds: LatLngBounds,
    pub strict_bounds: bool,
    pub country: &'static str,
    pub fields: &'static [&'static str],
}

/// Body of the info popup shown when a marker is clicked.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupContent {
    pub title: String,
    pub lines: Vec<String>,
}

impl PopupContent {
    #[cfg(test)]
    pub fn mentions(&self, text: &str) -> bool {
        self.title.contains(text) || self.lines.iter().any(|line| line.contains(text))
    }
}

/// A place reported by the search behavior. Either part may be missing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaceResult {
    pub formatted_address: Option<String>,
    pub location: Option<LatLng>,
}

/// Constructors and handle operations of a mapping SDK.
///
/// Handles are cheap clones of provider-owned objects. Whoever creates a
/// handle is responsible for releasing it through `detach_*`,
/// `remove_listener` or `clear_search_behavior`.
pub trait MapProvider: Clone + 'static {
    /// Element a canvas is drawn into. Compared to notice a replaced container.
    type Mount: Clone + PartialEq + 'static;
    /// Text field the search behavior attaches to.
    type Field;
    type Canvas: Clone + 'static;
    type Marker: Clone + 'static;
    type Popup: Clone + 'static;
    type Circle: 'static;
    type SearchBehavior: Clone + 'static;
    type Listener: 'static;

    fn create_canvas(
        &self,
        mount: &Self::Mount,
        options: &CanvasOptions,
    ) -> Result<Self::Canvas, ProviderError>;

    fn create_marker(
        &self,
        canvas: &Self::Canvas,
        options: &MarkerOptions,
    ) -> Result<Self::Marker, ProviderError>;

    fn create_popup(&self) -> Result<Self::Popup, ProviderError>;

    fn create_circle(
        &self,
        canvas: &Self::Canvas,
        options: &CircleOptions,
    ) -> Result<Self::Circle, ProviderError>;

    fn create_search_behavior(
        &self,
        field: &Self::Field,
        options: &SearchOptions,
    ) -> Result<Self::SearchBehavior, ProviderError>;

    fn recenter(&self, canvas: &Self::Canvas, options: &CanvasOptions);

    fn on_marker_click(
        &self,
        marker: &Self::Marker,
        handler: Box<dyn FnMut()>,
    ) -> Result<Self::Listener, ProviderError>;

    fn on_place_changed(
        &self,
        behavior: &Self::SearchBehavior,
        handler: Box<dyn FnMut(PlaceResult)>,
    ) -> Result<Self::Listener, ProviderError>;

    fn remove_listener(&self, listener: Self::Listener);

    fn detach_marker(&self, marker: &Self::Marker);

    fn detach_circle(&self, circle: &Self::Circle);

    fn set_popup_content(
        &self,
        popup: &Self::Popup,
        content: &PopupContent,
    ) -> Result<(), ProviderError>;

    fn open_popup(&self, popup: &Self::Popup, canvas: &Self::Canvas, anchor: &Self::Marker);

    fn close_popup(&self, popup: &Self::Popup);

    fn clear_search_behavior(&self, behavior: Self::SearchBehavior);
}
