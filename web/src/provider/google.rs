//! [`MapProvider`] backed by the Google Maps JavaScript API.

use js_sys::{Array, Function, Object, Reflect};
use shared_types::LatLng;
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{Element, HtmlElement, HtmlInputElement};

use super::{
    CanvasOptions, CircleOptions, MapProvider, MarkerOptions, PlaceResult, PopupContent,
    ProviderError, SearchOptions,
};

mod sys {
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlElement, HtmlInputElement};

    #[wasm_bindgen(js_namespace = ["google", "maps"])]
    extern "C" {
        #[derive(Debug, Clone)]
        pub type Map;
        #[wasm_bindgen(constructor, catch)]
        pub fn new(element: &HtmlElement, options: &JsValue) -> Result<Map, JsValue>;
        #[wasm_bindgen(method, js_name = setCenter)]
        pub fn set_center(this: &Map, center: &JsValue);
        #[wasm_bindgen(method, js_name = setZoom)]
        pub fn set_zoom(this: &Map, zoom: f64);

        #[derive(Debug, Clone)]
        pub type Marker;
        #[wasm_bindgen(constructor, catch)]
        pub fn new(options: &JsValue) -> Result<Marker, JsValue>;
        #[wasm_bindgen(method, js_name = setMap)]
        pub fn set_map(this: &Marker, map: &JsValue);

        #[derive(Debug, Clone)]
        pub type InfoWindow;
        #[wasm_bindgen(constructor, catch)]
        pub fn new(options: &JsValue) -> Result<InfoWindow, JsValue>;
        #[wasm_bindgen(method, js_name = setContent)]
        pub fn set_content(this: &InfoWindow, content: &JsValue);
        #[wasm_bindgen(method)]
        pub fn open(this: &InfoWindow, map: &Map, anchor: &Marker);
        #[wasm_bindgen(method)]
        pub fn close(this: &InfoWindow);

        #[derive(Debug, Clone)]
        pub type Circle;
        #[wasm_bindgen(constructor, catch)]
        pub fn new(options: &JsValue) -> Result<Circle, JsValue>;
        #[wasm_bindgen(method, js_name = setMap)]
        pub fn set_map(this: &Circle, map: &JsValue);

        pub type Size;
        #[wasm_bindgen(constructor)]
        pub fn new(width: f64, height: f64) -> Size;

        pub type Point;
        #[wasm_bindgen(constructor)]
        pub fn new(x: f64, y: f64) -> Point;

        pub type LatLng;
        #[wasm_bindgen(method)]
        pub fn lat(this: &LatLng) -> f64;
        #[wasm_bindgen(method)]
        pub fn lng(this: &LatLng) -> f64;

        pub type MapsEventListener;
    }

    #[wasm_bindgen(js_namespace = ["google", "maps", "places"])]
    extern "C" {
        #[derive(Debug, Clone)]
        pub type Autocomplete;
        #[wasm_bindgen(constructor, catch)]
        pub fn new(input: &HtmlInputElement, options: &JsValue) -> Result<Autocomplete, JsValue>;
        #[wasm_bindgen(method, js_name = getPlace)]
        pub fn get_place(this: &Autocomplete) -> JsValue;
    }

    #[wasm_bindgen(js_namespace = ["google", "maps", "event"])]
    extern "C" {
        #[wasm_bindgen(js_name = addListener, catch)]
        pub fn add_listener(
            instance: &JsValue,
            event_name: &str,
            handler: &js_sys::Function,
        ) -> Result<MapsEventListener, JsValue>;
        #[wasm_bindgen(js_name = removeListener)]
        pub fn remove_listener(listener: &MapsEventListener);
        #[wasm_bindgen(js_name = clearInstanceListeners)]
        pub fn clear_instance_listeners(instance: &JsValue);
    }
}

pub use sys::{Autocomplete, Circle, InfoWindow, Map, Marker};

/// Registered event listener. Dropping it frees the Rust closure, so it must
/// outlive the registration and be handed back to `remove_listener`.
pub struct GoogleListener {
    handle: sys::MapsEventListener,
    _closure: Closure<dyn FnMut()>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GoogleMaps;

/// True once `google.maps.places` is present on the page.
pub fn library_loaded() -> bool {
    ["google", "maps", "places"]
        .iter()
        .try_fold(JsValue::from(js_sys::global()), |scope, key| {
            Reflect::get(&scope, &JsValue::from_str(key))
                .ok()
                .filter(|value| !value.is_undefined() && !value.is_null())
        })
        .is_some()
}

fn js_message(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{err:?}"))
}

fn construction(object: &'static str) -> impl FnOnce(JsValue) -> ProviderError {
    move |err| ProviderError::Construction {
        object,
        message: js_message(&err),
    }
}

fn js_object(entries: &[(&str, JsValue)]) -> Result<JsValue, JsValue> {
    let object = Object::new();
    for (key, value) in entries {
        Reflect::set(&object, &JsValue::from_str(key), value)?;
    }
    Ok(object.into())
}

fn lat_lng_literal(point: LatLng) -> Result<JsValue, JsValue> {
    js_object(&[("lat", point.lat.into()), ("lng", point.lng.into())])
}

fn canvas_options(options: &CanvasOptions) -> Result<JsValue, JsValue> {
    js_object(&[
        ("center", lat_lng_literal(options.center)?),
        ("zoom", options.zoom.into()),
    ])
}

fn marker_options(canvas: &Map, options: &MarkerOptions) -> Result<JsValue, JsValue> {
    let icon = js_object(&[
        ("url", JsValue::from_str(&options.icon.url)),
        (
            "scaledSize",
            sys::Size::new(options.icon.size.0, options.icon.size.1).into(),
        ),
        (
            "anchor",
            sys::Point::new(options.icon.anchor.0, options.icon.anchor.1).into(),
        ),
    ])?;
    js_object(&[
        ("map", canvas.clone().into()),
        ("position", lat_lng_literal(options.position)?),
        ("title", JsValue::from_str(&options.title)),
        ("icon", icon),
    ])
}

fn circle_options(canvas: &Map, options: &CircleOptions) -> Result<JsValue, JsValue> {
    js_object(&[
        ("map", canvas.clone().into()),
        ("center", lat_lng_literal(options.center)?),
        ("radius", options.radius.into()),
        ("strokeColor", JsValue::from_str(options.stroke_color)),
        ("strokeOpacity", options.stroke_opacity.into()),
        ("strokeWeight", options.stroke_weight.into()),
        ("fillColor", JsValue::from_str(options.fill_color)),
        ("fillOpacity", options.fill_opacity.into()),
    ])
}

fn search_options(options: &SearchOptions) -> Result<JsValue, JsValue> {
    let bounds = js_object(&[
        ("south", options.bounds.south_west.lat.into()),
        ("west", options.bounds.south_west.lng.into()),
        ("north", options.bounds.north_east.lat.into()),
        ("east", options.bounds.north_east.lng.into()),
    ])?;
    let restrictions = js_object(&[("country", JsValue::from_str(options.country))])?;
    let fields = options
        .fields
        .iter()
        .map(|field| JsValue::from_str(field))
        .collect::<Array>();
    js_object(&[
        ("bounds", bounds),
        ("strictBounds", options.strict_bounds.into()),
        ("componentRestrictions", restrictions),
        ("fields", fields.into()),
    ])
}

fn present(value: &JsValue) -> bool {
    !value.is_undefined() && !value.is_null()
}

fn read_place(place: &JsValue) -> PlaceResult {
    let formatted_address = Reflect::get(place, &JsValue::from_str("formatted_address"))
        .ok()
        .and_then(|value| value.as_string());
    let location = Reflect::get(place, &JsValue::from_str("geometry"))
        .ok()
        .filter(present)
        .and_then(|geometry| Reflect::get(&geometry, &JsValue::from_str("location")).ok())
        .filter(present)
        .map(|location| {
            let location: sys::LatLng = location.unchecked_into();
            LatLng::new(location.lat(), location.lng())
        });

    PlaceResult {
        formatted_address,
        location,
    }
}

fn render_popup(content: &PopupContent) -> Result<Element, JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("document is not available"))?;

    let root = document.create_element("div")?;
    root.set_class_name("location-popup");
    let title = document.create_element("h3")?;
    title.set_class_name("location-popup-title");
    title.set_text_content(Some(&content.title));
    root.append_child(&title)?;
    for line in &content.lines {
        let paragraph = document.create_element("p")?;
        paragraph.set_text_content(Some(line));
        root.append_child(&paragraph)?;
    }
    Ok(root)
}

fn listen(
    instance: &JsValue,
    event_name: &str,
    closure: Closure<dyn FnMut()>,
) -> Result<GoogleListener, ProviderError> {
    let handler: &Function = closure.as_ref().unchecked_ref();
    let handle = sys::add_listener(instance, event_name, handler)
        .map_err(|err| ProviderError::Listener(js_message(&err)))?;
    Ok(GoogleListener {
        handle,
        _closure: closure,
    })
}

impl MapProvider for GoogleMaps {
    type Mount = HtmlElement;
    type Field = HtmlInputElement;
    type Canvas = Map;
    type Marker = Marker;
    type Popup = InfoWindow;
    type Circle = Circle;
    type SearchBehavior = Autocomplete;
    type Listener = GoogleListener;

    fn create_canvas(
        &self,
        mount: &HtmlElement,
        options: &CanvasOptions,
    ) -> Result<Map, ProviderError> {
        if !library_loaded() {
            return Err(ProviderError::Unavailable);
        }
        let options = canvas_options(options).map_err(construction("map"))?;
        Map::new(mount, &options).map_err(construction("map"))
    }

    fn create_marker(&self, canvas: &Map, options: &MarkerOptions) -> Result<Marker, ProviderError> {
        let options = marker_options(canvas, options).map_err(construction("marker"))?;
        Marker::new(&options).map_err(construction("marker"))
    }

    fn create_popup(&self) -> Result<InfoWindow, ProviderError> {
        InfoWindow::new(&Object::new().into()).map_err(construction("info window"))
    }

    fn create_circle(&self, canvas: &Map, options: &CircleOptions) -> Result<Circle, ProviderError> {
        let options = circle_options(canvas, options).map_err(construction("circle"))?;
        Circle::new(&options).map_err(construction("circle"))
    }

    fn create_search_behavior(
        &self,
        field: &HtmlInputElement,
        options: &SearchOptions,
    ) -> Result<Autocomplete, ProviderError> {
        if !library_loaded() {
            return Err(ProviderError::Unavailable);
        }
        let options = search_options(options).map_err(construction("autocomplete"))?;
        Autocomplete::new(field, &options).map_err(construction("autocomplete"))
    }

    fn recenter(&self, canvas: &Map, options: &CanvasOptions) {
        match lat_lng_literal(options.center) {
            Ok(center) => {
                canvas.set_center(&center);
                canvas.set_zoom(options.zoom);
            }
            Err(err) => leptos::logging::error!("Failed to recenter map: {}", js_message(&err)),
        }
    }

    fn on_marker_click(
        &self,
        marker: &Marker,
        mut handler: Box<dyn FnMut()>,
    ) -> Result<GoogleListener, ProviderError> {
        let closure = Closure::<dyn FnMut()>::new(move || handler());
        listen(marker.as_ref(), "click", closure)
    }

    fn on_place_changed(
        &self,
        behavior: &Autocomplete,
        mut handler: Box<dyn FnMut(PlaceResult)>,
    ) -> Result<GoogleListener, ProviderError> {
        let source = behavior.clone();
        let closure =
            Closure::<dyn FnMut()>::new(move || handler(read_place(&source.get_place())));
        listen(behavior.as_ref(), "place_changed", closure)
    }

    fn remove_listener(&self, listener: GoogleListener) {
        sys::remove_listener(&listener.handle);
    }

    fn detach_marker(&self, marker: &Marker) {
        marker.set_map(&JsValue::NULL);
    }

    fn detach_circle(&self, circle: &Circle) {
        circle.set_map(&JsValue::NULL);
    }

    fn set_popup_content(
        &self,
        popup: &InfoWindow,
        content: &PopupContent,
    ) -> Result<(), ProviderError> {
        let node = render_popup(content).map_err(construction("popup content"))?;
        popup.set_content(node.as_ref());
        Ok(())
    }

    fn open_popup(&self, popup: &InfoWindow, canvas: &Map, anchor: &Marker) {
        popup.open(canvas, anchor);
    }

    fn close_popup(&self, popup: &InfoWindow) {
        popup.close();
    }

    fn clear_search_behavior(&self, behavior: Autocomplete) {
        sys::clear_instance_listeners(behavior.as_ref());
    }
}
