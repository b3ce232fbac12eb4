//! Tabular export
//!
//! One header row plus one comma-joined row per record. Fields that contain
//! a comma, quote or line break are quoted so the file reopens cleanly.

use crate::model::{
    Downtime, Equipment, MaintenanceTask, SparePart, Technician, Ticket, WorkOrder,
};
use crate::time::{format_date, format_timestamp};

/// A record type that can be exported as a CSV table
pub trait CsvRecord {
    /// Download file name for the table
    const FILE_NAME: &'static str;

    fn headers() -> &'static [&'static str];

    fn fields(&self) -> Vec<String>;
}

/// Render records as CSV text (no trailing newline)
pub fn to_csv<T: CsvRecord>(records: &[T]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(join_row(T::headers().iter().copied()));
    for record in records {
        let fields = record.fields();
        lines.push(join_row(fields.iter().map(String::as_str)));
    }
    lines.join("\n")
}

fn join_row<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    fields.map(escape_field).collect::<Vec<_>>().join(",")
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn optional_date(date: Option<chrono::NaiveDate>) -> String {
    date.map(format_date).unwrap_or_default()
}

impl CsvRecord for Equipment {
    const FILE_NAME: &'static str = "equipements.csv";

    fn headers() -> &'static [&'static str] {
        &["Nom", "Modèle", "N° Série", "Date Mise en Service", "Statut"]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.model.clone(),
            self.serial_number.clone(),
            format_date(self.commissioning_date),
            self.status.label().to_string(),
        ]
    }
}

impl CsvRecord for Ticket {
    const FILE_NAME: &'static str = "tickets.csv";

    fn headers() -> &'static [&'static str] {
        &[
            "Numéro",
            "Sujet",
            "Équipement",
            "Priorité",
            "Statut",
            "Date Ouverture",
            "Date Résolution",
        ]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.number.clone(),
            self.subject.clone(),
            self.equipment_id.clone(),
            self.priority.label().to_string(),
            self.status.label().to_string(),
            format_date(self.opened_date),
            optional_date(self.resolved_date),
        ]
    }
}

impl CsvRecord for Downtime {
    const FILE_NAME: &'static str = "arrets.csv";

    fn headers() -> &'static [&'static str] {
        &["Équipement", "Raison", "Début", "Fin", "Statut"]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.equipment_id.clone(),
            self.reason.clone(),
            format_timestamp(self.start),
            self.end.map(format_timestamp).unwrap_or_default(),
            self.status.label().to_string(),
        ]
    }
}

impl CsvRecord for MaintenanceTask {
    const FILE_NAME: &'static str = "maintenance.csv";

    fn headers() -> &'static [&'static str] {
        &["Tâche", "Équipement", "Échéance", "Statut", "Date Réalisation"]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.task.clone(),
            self.equipment_id.clone(),
            format_date(self.due_date),
            self.status.label().to_string(),
            optional_date(self.completed_date),
        ]
    }
}

impl CsvRecord for WorkOrder {
    const FILE_NAME: &'static str = "ordres-travail.csv";

    fn headers() -> &'static [&'static str] {
        &[
            "Équipement",
            "Description",
            "Technicien",
            "Priorité",
            "Statut",
            "Date Création",
            "Date Clôture",
        ]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.equipment_id.clone(),
            self.description.clone(),
            self.technician_id.clone().unwrap_or_default(),
            self.priority.label().to_string(),
            self.status.label().to_string(),
            format_date(self.created_date),
            optional_date(self.completed_date),
        ]
    }
}

impl CsvRecord for SparePart {
    const FILE_NAME: &'static str = "pieces-detachees.csv";

    fn headers() -> &'static [&'static str] {
        &[
            "Nom",
            "Référence",
            "Quantité",
            "Emplacement",
            "Date Acquisition",
            "Date Installation",
        ]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.part_number.clone(),
            self.quantity.to_string(),
            self.location.clone(),
            optional_date(self.acquisition_date),
            optional_date(self.installation_date),
        ]
    }
}

impl CsvRecord for Technician {
    const FILE_NAME: &'static str = "techniciens.csv";

    fn headers() -> &'static [&'static str] {
        &["Nom", "Email", "Téléphone", "Spécialisation"]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.specialization.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EquipmentStatus;
    use chrono::NaiveDate;

    #[test]
    fn test_equipment_csv_layout() {
        let records = vec![Equipment {
            id: "eq-001".to_string(),
            name: "Linac Elekta Versa HD".to_string(),
            model: "Versa HD".to_string(),
            serial_number: "VHD-2023-001".to_string(),
            commissioning_date: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
            status: EquipmentStatus::Operational,
        }];

        let csv = to_csv(&records);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Nom,Modèle,N° Série,Date Mise en Service,Statut");
        assert_eq!(
            lines[1],
            "Linac Elekta Versa HD,Versa HD,VHD-2023-001,2023-01-15,Opérationnel"
        );
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_empty_table_is_header_only() {
        assert_eq!(to_csv::<Technician>(&[]), "Nom,Email,Téléphone,Spécialisation");
    }

    #[test]
    fn test_fields_with_separators_are_quoted() {
        let tech = Technician {
            id: "tech-1".to_string(),
            name: "Dupont, Jean".to_string(),
            email: "jean@hospital.fr".to_string(),
            phone: "01 23".to_string(),
            specialization: "Linac \"Elekta\"".to_string(),
        };
        let csv = to_csv(&[tech]);
        assert!(csv.ends_with("\"Dupont, Jean\",jean@hospital.fr,01 23,\"Linac \"\"Elekta\"\"\""));
    }
}
