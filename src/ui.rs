use std::cell::RefCell;
use std::rc::Rc;

use gtk::prelude::*;
use gtk::{glib, Align, DropDown, Label, ListBox, Orientation, ScrolledWindow, SearchEntry};
use libadwaita::prelude::*;
use libadwaita::{ApplicationWindow, ColorScheme, HeaderBar, StyleManager, ToolbarView, WindowTitle};
use tracing::debug;

use crate::command::Command;
use crate::config::Settings;
use crate::data::{APP_TITLE, CATEGORY_FILTERS};
use crate::list::{ListContent, ListEntry};
use crate::query::{Filter, QueryClient};
use crate::session::{Applied, Session};
use crate::shumate::ShumateSurface;

const STYLE: &str = "
.map-pin {
    border-radius: 16px;
    padding: 4px;
    min-height: 0;
    min-width: 0;
    color: white;
    box-shadow: 0 2px 6px alpha(black, 0.4);
}
.pin-default-blue { background-color: #2a81cb; }
.pin-dental-green { background-color: #2aad27; }
.pin-maternity-red { background-color: #cb2b3e; }
.pin-specialist-violet { background-color: #9c2bcb; }
.map-popover > contents {
    background-color: alpha(@card_bg_color, 0.95);
    border-radius: 12px;
    box-shadow: 0 4px 16px alpha(black, 0.6);
}
.clinic-card {
    background-color: @card_bg_color;
    border-radius: 12px;
    padding: 8px 10px;
    border: 1px solid alpha(@borders, 0.2);
    transition: all 200ms cubic-bezier(0.4, 0, 0.2, 1);
}
.clinic-card:hover {
    border-color: alpha(@accent_bg_color, 0.3);
    box-shadow: 0 4px 12px alpha(black, 0.12);
}
.clinic-name {
    font-size: 14px;
    font-weight: 600;
}
.badge {
    border-radius: 6px;
    padding: 3px 8px;
    font-size: 10px;
    font-weight: 600;
    text-transform: uppercase;
    letter-spacing: 0.5px;
}
.badge-primary { background-color: alpha(@accent_bg_color, 0.25); }
.badge-success { background-color: alpha(@success_bg_color, 0.25); }
.badge-danger { background-color: alpha(@error_bg_color, 0.25); }
.badge-info { background-color: alpha(#17a2b8, 0.25); }
";

/// Routes commands from widgets to the session. Cloned into every signal handler.
#[derive(Clone)]
pub struct Controller {
    session: Rc<RefCell<Session<ShumateSurface>>>,
    client: QueryClient,
    last_filter: Rc<RefCell<Filter>>,
    list: ListBox,
    status: Label,
}

impl Controller {
    pub fn dispatch(&self, command: Command) {
        match command {
            Command::Refresh(filter) => self.refresh(filter),
            Command::Focus(at) => {
                self.session.borrow_mut().focus(at);
            }
        }
    }

    fn refresh(&self, filter: Filter) {
        *self.last_filter.borrow_mut() = filter.clone();
        let ticket = self.session.borrow_mut().begin_fetch();

        let this = self.clone();
        glib::spawn_future_local(async move {
            let result = this.client.fetch_records(&filter).await;
            let applied = this.session.borrow_mut().apply(ticket, result);
            if let Applied::Updated(content) = applied {
                this.show_list(&content);
                let count = this.session.borrow().dataset().len();
                this.show_status(count);
            }
        });
    }

    fn refresh_last(&self) {
        let filter = self.last_filter.borrow().clone();
        self.dispatch(Command::Refresh(filter));
    }

    fn show_list(&self, content: &ListContent) {
        while let Some(child) = self.list.first_child() {
            self.list.remove(&child);
        }

        match content {
            ListContent::Empty(message) => {
                let empty = Label::builder()
                    .label(*message)
                    .margin_top(12)
                    .margin_bottom(12)
                    .build();
                empty.add_css_class("dim-label");
                self.list.append(&empty);
            }
            ListContent::Entries(entries) => {
                for entry in entries {
                    self.list.append(&self.clinic_card(entry));
                }
            }
        }
    }

    fn clinic_card(&self, entry: &ListEntry) -> gtk::Box {
        let card = gtk::Box::builder()
            .orientation(Orientation::Vertical)
            .spacing(4)
            .margin_top(4)
            .margin_bottom(4)
            .margin_start(6)
            .margin_end(6)
            .build();
        card.add_css_class("clinic-card");
        card.add_css_class("activatable");

        let name = Label::builder()
            .label(&entry.name)
            .xalign(0.0)
            .wrap(true)
            .build();
        name.add_css_class("clinic-name");
        card.append(&name);

        let address = Label::builder()
            .label(&entry.address)
            .xalign(0.0)
            .wrap(true)
            .build();
        address.add_css_class("dim-label");
        address.add_css_class("caption");
        card.append(&address);

        let badge = Label::builder()
            .label(&entry.badge_text)
            .halign(Align::Start)
            .margin_top(4)
            .build();
        badge.add_css_class("badge");
        badge.add_css_class(&format!("badge-{}", entry.badge_class));
        card.append(&badge);

        let gesture = gtk::GestureClick::new();
        let action = entry.action.clone();
        let this = self.clone();
        gesture.connect_released(move |_, _, _, _| {
            this.dispatch(action.clone());
        });
        card.add_controller(gesture);

        card
    }

    fn show_status(&self, count: usize) {
        let now = chrono::Local::now();
        self.status
            .set_label(&format!("{} klinik · diperbarui {}", count, now.format("%H:%M")));
    }
}

pub fn build_ui(app: &libadwaita::Application, settings: &Settings) -> anyhow::Result<()> {
    StyleManager::default().set_color_scheme(ColorScheme::PreferDark);

    let surface = ShumateSurface::new(settings)?;
    let map = surface.widget().clone();
    let session = Rc::new(RefCell::new(Session::new(surface, settings.focus_zoom)));

    let search_entry = SearchEntry::builder()
        .placeholder_text("Cari nama atau alamat klinik...")
        .hexpand(true)
        .build();

    let labels: Vec<&str> = CATEGORY_FILTERS.iter().map(|(_, label)| *label).collect();
    let category = DropDown::from_strings(&labels);

    let search_button = gtk::Button::builder()
        .icon_name("system-search-symbolic")
        .tooltip_text("Terapkan filter")
        .build();
    search_button.add_css_class("suggested-action");

    let filter_row = gtk::Box::builder()
        .orientation(Orientation::Horizontal)
        .spacing(6)
        .build();
    filter_row.append(&search_entry);
    filter_row.append(&category);
    filter_row.append(&search_button);

    let status = Label::builder().xalign(0.0).build();
    status.add_css_class("dim-label");
    status.add_css_class("caption");

    let results_list = ListBox::builder()
        .selection_mode(gtk::SelectionMode::None)
        .build();

    let sidebar = gtk::Box::builder()
        .orientation(Orientation::Vertical)
        .spacing(12)
        .margin_top(12)
        .margin_bottom(12)
        .margin_start(12)
        .margin_end(12)
        .build();
    sidebar.append(&filter_row);
    sidebar.append(&status);
    sidebar.append(&results_list);

    let scrolled_window = ScrolledWindow::builder()
        .hscrollbar_policy(gtk::PolicyType::Never)
        .width_request(320)
        .child(&sidebar)
        .build();

    let controller = Controller {
        session,
        client: QueryClient::new(settings.endpoint.clone()),
        last_filter: Rc::new(RefCell::new(Filter::default())),
        list: results_list,
        status,
    };
    debug!(endpoint = controller.client.endpoint(), "clinic endpoint");

    // Enter in the search field and the search button both submit.
    let controller_clone = controller.clone();
    let category_clone = category.clone();
    search_entry.connect_activate(move |entry| {
        let filter = read_filter(entry, &category_clone);
        controller_clone.dispatch(Command::Refresh(filter));
    });
    let controller_clone = controller.clone();
    let search_entry_clone = search_entry.clone();
    search_button.connect_clicked(move |_| {
        let filter = read_filter(&search_entry_clone, &category);
        controller_clone.dispatch(Command::Refresh(filter));
    });

    let refresh_button = gtk::Button::builder()
        .icon_name("view-refresh-symbolic")
        .tooltip_text("Muat ulang data klinik")
        .build();
    let controller_clone = controller.clone();
    refresh_button.connect_clicked(move |_| controller_clone.refresh_last());

    let header_bar = HeaderBar::builder()
        .title_widget(&WindowTitle::new(APP_TITLE, "Peta persebaran klinik"))
        .build();
    header_bar.pack_start(&refresh_button);

    let paned = gtk::Paned::builder()
        .orientation(Orientation::Horizontal)
        .wide_handle(true)
        .start_child(&scrolled_window)
        .end_child(&map)
        .resize_start_child(false)
        .shrink_start_child(false)
        .resize_end_child(true)
        .shrink_end_child(false)
        .position(340)
        .build();

    // Stack the sidebar above the map on narrow windows.
    let paned_weak = paned.downgrade();
    paned.add_tick_callback(move |_widget, _clock| {
        if let Some(paned) = paned_weak.upgrade() {
            let width = paned.width();
            let height = paned.height();

            if width > 0 && height > 0 {
                let should_be_horizontal = width > height;
                let is_horizontal = paned.orientation() == Orientation::Horizontal;

                if should_be_horizontal != is_horizontal {
                    if should_be_horizontal {
                        paned.set_orientation(Orientation::Horizontal);
                        paned.set_position(340);
                    } else {
                        paned.set_orientation(Orientation::Vertical);
                        paned.set_position(260);
                    }
                }
            }
        }
        glib::ControlFlow::Continue
    });

    let toolbar_view = ToolbarView::builder().build();
    toolbar_view.add_top_bar(&header_bar);
    toolbar_view.set_content(Some(&paned));

    let window = ApplicationWindow::builder()
        .application(app)
        .title(APP_TITLE)
        .default_width(1024)
        .default_height(680)
        .content(&toolbar_view)
        .build();

    let css_provider = gtk::CssProvider::new();
    css_provider.load_from_data(STYLE);
    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &css_provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }

    window.present();

    // Initial load with no filters.
    controller.dispatch(Command::Refresh(Filter::default()));
    Ok(())
}

fn read_filter(search_entry: &SearchEntry, category: &DropDown) -> Filter {
    let jenis = CATEGORY_FILTERS
        .get(category.selected() as usize)
        .map(|(value, _)| *value)
        .unwrap_or_default();
    Filter::new(search_entry.text().to_string(), jenis)
}
