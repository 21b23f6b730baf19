use crate::data::LatLng;
use crate::query::Filter;

/// Everything the window can ask the session to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Fetch clinics matching the filter and redraw pins and list.
    Refresh(Filter),
    /// Recenter on a clinic and open its popup.
    Focus(LatLng),
}
