use anyhow::Context;
use gtk::prelude::*;
use gtk::{Label, Orientation, Popover};
use libshumate::prelude::{LocationExt, MarkerExt};
use tracing::warn;

use crate::config::Settings;
use crate::data::{LatLng, PinStyle};
use crate::surface::{LineKind, MapSurface, PinContent};

/// A marker on the libshumate layer: a button that pops up the clinic details.
#[derive(Clone)]
pub struct ShumatePin {
    marker: libshumate::Marker,
    popover: Popover,
}

pub struct ShumateSurface {
    widget: libshumate::SimpleMap,
    map: libshumate::Map,
    layer: libshumate::MarkerLayer,
}

impl ShumateSurface {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let widget = libshumate::SimpleMap::new();
        let map_source = libshumate::RasterRenderer::from_url(&settings.tile_url);
        widget.set_map_source(Some(&map_source));

        let map = widget.map().context("map widget has no map view")?;
        let viewport = map.viewport().context("map view has no viewport")?;

        let layer = libshumate::MarkerLayer::new(&viewport);
        map.add_layer(&layer);

        viewport.set_max_zoom_level(settings.max_zoom);
        viewport.set_zoom_level(settings.zoom);
        let center = settings.center();
        map.center_on(center.lat, center.lng);

        widget.set_vexpand(true);
        widget.set_hexpand(true);

        Ok(Self { widget, map, layer })
    }

    pub fn widget(&self) -> &libshumate::SimpleMap {
        &self.widget
    }
}

impl MapSurface for ShumateSurface {
    type Pin = ShumatePin;

    fn center_on(&mut self, at: LatLng, zoom: f64) {
        self.map.go_to_full(at.lat, at.lng, zoom);
    }

    fn create_pin(&mut self, at: LatLng, style: PinStyle) -> ShumatePin {
        let button = gtk::Button::builder()
            .icon_name("mark-location-symbolic")
            .build();
        button.add_css_class("map-pin");
        button.add_css_class(&format!("pin-{}", style.key));

        let popover = Popover::builder().build();
        popover.add_css_class("map-popover");
        popover.set_parent(&button);

        let popover_clone = popover.clone();
        button.connect_clicked(move |_| {
            popover_clone.popup();
        });

        let marker = libshumate::Marker::new();
        marker.set_child(Some(&button));
        marker.set_location(at.lat, at.lng);

        ShumatePin { marker, popover }
    }

    fn attach_content(&mut self, pin: &ShumatePin, content: &PinContent) {
        pin.popover.set_child(Some(&popup_content(content)));
    }

    fn add_pin(&mut self, pin: &ShumatePin) {
        self.layer.add_marker(&pin.marker);
    }

    fn remove_pin(&mut self, pin: &ShumatePin) {
        pin.popover.popdown();
        pin.popover.unparent();
        self.layer.remove_marker(&pin.marker);
    }

    fn open_content(&mut self, pin: &ShumatePin) {
        pin.popover.popup();
    }
}

fn popup_content(content: &PinContent) -> gtk::Box {
    let popover_box = gtk::Box::builder()
        .orientation(Orientation::Vertical)
        .spacing(6)
        .margin_top(10)
        .margin_bottom(10)
        .margin_start(10)
        .margin_end(10)
        .width_request(240)
        .build();

    let title = Label::builder()
        .label(&content.title)
        .xalign(0.0)
        .wrap(true)
        .build();
    title.add_css_class("title-4");
    popover_box.append(&title);

    for line in &content.lines {
        let row = gtk::Box::builder()
            .orientation(Orientation::Horizontal)
            .spacing(6)
            .build();
        row.append(&gtk::Image::from_icon_name(line.kind.icon_name()));

        let label = Label::builder()
            .label(&line.text)
            .xalign(0.0)
            .wrap(true)
            .hexpand(true)
            .build();
        if line.kind == LineKind::Category {
            label.set_hexpand(false);
            label.add_css_class("badge");
            label.add_css_class("badge-primary");
        }
        row.append(&label);
        popover_box.append(&row);
    }

    let directions = gtk::Button::builder()
        .label("Petunjuk Arah")
        .margin_top(4)
        .build();
    directions.add_css_class("suggested-action");
    directions.add_css_class("pill");
    let url = content.directions_url.clone();
    directions.connect_clicked(move |_| {
        if let Err(e) = open::that(&url) {
            warn!(error = %e, %url, "failed to open directions");
        }
    });
    popover_box.append(&directions);

    popover_box
}
