use crate::data::{LatLng, PinStyle};

/// What a pin reveals when opened.
#[derive(Debug, Clone, PartialEq)]
pub struct PinContent {
    pub title: String,
    pub lines: Vec<ContentLine>,
    pub directions_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentLine {
    pub kind: LineKind,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Address,
    Phone,
    Hours,
    Category,
    Facilities,
}

impl LineKind {
    pub fn icon_name(self) -> &'static str {
        match self {
            LineKind::Address => "mark-location-symbolic",
            LineKind::Phone => "call-start-symbolic",
            LineKind::Hours => "alarm-symbolic",
            LineKind::Category => "emblem-documents-symbolic",
            LineKind::Facilities => "emblem-ok-symbolic",
        }
    }
}

/// The map widget as seen by the synchronizer and focus controller.
pub trait MapSurface {
    type Pin;

    fn center_on(&mut self, at: LatLng, zoom: f64);
    fn create_pin(&mut self, at: LatLng, style: PinStyle) -> Self::Pin;
    fn attach_content(&mut self, pin: &Self::Pin, content: &PinContent);
    fn add_pin(&mut self, pin: &Self::Pin);
    fn remove_pin(&mut self, pin: &Self::Pin);
    fn open_content(&mut self, pin: &Self::Pin);
}
