use crate::command::Command;
use crate::data::Clinic;

pub const EMPTY_MESSAGE: &str = "Tidak ada klinik ditemukan";

#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub name: String,
    pub address: String,
    pub badge_text: String,
    pub badge_class: &'static str,
    /// Issued when the entry is activated.
    pub action: Command,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListContent {
    Empty(&'static str),
    Entries(Vec<ListEntry>),
}

impl ListContent {
    #[cfg(test)]
    pub fn len(&self) -> usize {
        match self {
            ListContent::Empty(_) => 0,
            ListContent::Entries(entries) => entries.len(),
        }
    }
}

/// Sidebar model for a dataset. The whole list is rebuilt every time.
pub fn render(dataset: &[Clinic]) -> ListContent {
    if dataset.is_empty() {
        return ListContent::Empty(EMPTY_MESSAGE);
    }

    let entries = dataset
        .iter()
        .map(|clinic| ListEntry {
            name: clinic.name.clone(),
            address: clinic.address.clone(),
            badge_text: clinic.category.clone(),
            badge_class: clinic.kind().style().badge,
            action: Command::Focus(clinic.location()),
        })
        .collect();
    ListContent::Entries(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::LatLng;

    #[test]
    fn empty_dataset_shows_fixed_message() {
        assert_eq!(render(&[]), ListContent::Empty("Tidak ada klinik ditemukan"));
        assert_eq!(render(&[]).len(), 0);
    }

    #[test]
    fn entries_carry_badge_and_exact_focus_target() {
        let dataset: Vec<Clinic> = serde_json::from_str(
            r#"[
                {"nama_klinik":"Klinik A","alamat":"Jl. 1","jenis_klinik":"gigi","latitude":-6.65,"longitude":110.74},
                {"nama_klinik":"Klinik B","alamat":"Jl. 2","jenis_klinik":"lainnya","latitude":-6.6584123456789,"longitude":110.7456987654321}
            ]"#,
        )
        .unwrap();

        let ListContent::Entries(entries) = render(&dataset) else {
            panic!("expected entries");
        };

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].badge_text, "gigi");
        assert_eq!(entries[0].badge_class, "success");
        assert_eq!(entries[0].action, Command::Focus(LatLng::new(-6.65, 110.74)));
        assert_eq!(entries[1].badge_class, "primary");
        assert_eq!(entries[1].action, Command::Focus(dataset[1].location()));
    }
}
