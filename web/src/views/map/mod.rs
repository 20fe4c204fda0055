pub mod location_map;
pub mod map_marker;
pub mod map_marker_popup;
pub mod map_state;
