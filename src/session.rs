use tracing::{debug, info, warn};

use crate::data::{Clinic, LatLng};
use crate::error::QueryError;
use crate::focus;
use crate::list::{self, ListContent};
use crate::markers::MarkerSet;
use crate::surface::MapSurface;

/// Identifies one issued fetch. Only the newest ticket may change the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, PartialEq)]
pub enum Applied {
    Updated(ListContent),
    Failed,
    Stale,
}

/// Map, pins and dataset for one window.
pub struct Session<S: MapSurface> {
    surface: S,
    markers: MarkerSet<S::Pin>,
    dataset: Vec<Clinic>,
    focus_zoom: f64,
    issued: u64,
}

impl<S: MapSurface> Session<S> {
    pub fn new(surface: S, focus_zoom: f64) -> Self {
        Self {
            surface,
            markers: MarkerSet::default(),
            dataset: Vec::new(),
            focus_zoom,
            issued: 0,
        }
    }

    pub fn dataset(&self) -> &[Clinic] {
        &self.dataset
    }

    #[cfg(test)]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    #[cfg(test)]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn begin_fetch(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// Applies a fetch outcome. Failures and superseded responses leave
    /// the current dataset and pins as they are.
    pub fn apply(&mut self, ticket: Ticket, result: Result<Vec<Clinic>, QueryError>) -> Applied {
        if ticket.0 < self.issued {
            debug!(ticket = ticket.0, newest = self.issued, "dropping superseded response");
            return Applied::Stale;
        }

        match result {
            Ok(dataset) => {
                self.markers.sync(&mut self.surface, &dataset);
                self.dataset = dataset;
                info!(clinics = self.dataset.len(), "clinic list updated");
                Applied::Updated(list::render(&self.dataset))
            }
            Err(err) => {
                warn!(error = %err, transport = err.is_transport(), "failed to load clinics");
                Applied::Failed
            }
        }
    }

    pub fn focus(&mut self, at: LatLng) -> usize {
        focus::focus(&mut self.surface, &self.markers, at, self.focus_zoom)
    }
}
