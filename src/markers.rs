use tracing::debug;

use crate::data::{Clinic, LatLng};
use crate::surface::{ContentLine, LineKind, MapSurface, PinContent};

#[derive(Debug, Clone)]
pub struct PlacedPin<P> {
    pub at: LatLng,
    pub handle: P,
}

/// Pins currently on the map, in dataset order.
#[derive(Debug)]
pub struct MarkerSet<P> {
    pins: Vec<PlacedPin<P>>,
}

impl<P> Default for MarkerSet<P> {
    fn default() -> Self {
        Self { pins: Vec::new() }
    }
}

impl<P> MarkerSet<P> {
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &PlacedPin<P>> {
        self.pins.iter()
    }

    /// Every pin placed exactly at `at`. Duplicate coordinates all match.
    pub fn at(&self, at: LatLng) -> impl Iterator<Item = &PlacedPin<P>> {
        self.pins.iter().filter(move |pin| pin.at == at)
    }

    /// Replaces every pin with one per record. No diffing: old pins are always removed.
    pub fn sync<S>(&mut self, surface: &mut S, dataset: &[Clinic])
    where
        S: MapSurface<Pin = P>,
    {
        for pin in self.pins.drain(..) {
            surface.remove_pin(&pin.handle);
        }

        for clinic in dataset {
            let at = clinic.location();
            let handle = surface.create_pin(at, clinic.kind().style());
            surface.attach_content(&handle, &describe(clinic));
            surface.add_pin(&handle);
            self.pins.push(PlacedPin { at, handle });
        }

        debug!(pins = self.pins.len(), "markers synchronized");
    }
}

/// Popup content for a clinic. Optional fields add a line only when present.
pub fn describe(clinic: &Clinic) -> PinContent {
    let mut lines = vec![ContentLine {
        kind: LineKind::Address,
        text: clinic.address.clone(),
    }];

    let mut push = |kind, text: Option<&String>| {
        if let Some(text) = text {
            lines.push(ContentLine {
                kind,
                text: text.clone(),
            });
        }
    };
    push(LineKind::Phone, clinic.phone.as_ref());
    push(LineKind::Hours, clinic.hours.as_ref());
    push(LineKind::Category, Some(&clinic.category.to_uppercase()));
    push(LineKind::Facilities, clinic.facilities.as_ref());

    PinContent {
        title: clinic.name.clone(),
        lines,
        directions_url: clinic.directions_url(),
    }
}
