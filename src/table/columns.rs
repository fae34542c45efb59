use jiff::civil::Date;

use super::TableRow;
use crate::models::{
    Attendance, Attendee, Award, City, Evaluation, Jury, JuryParticipation, Movie, Projection,
    Screening, Venue,
};

const NOTE_WIDTH: usize = 30;

/// Whole pesos with thousands separators, e.g. `$5,000`.
pub fn currency(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 { format!("-${grouped}") } else { format!("${grouped}") }
}

pub fn truncate(text: &str) -> String {
    if text.chars().count() <= NOTE_WIDTH {
        return text.to_string();
    }
    let head: String = text.chars().take(NOTE_WIDTH).collect();
    format!("{head}...")
}

fn id(id: Option<i32>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

fn optional_date(date: Option<Date>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}

impl TableRow for City {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Region", "Country", "Notes"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            id(self.id),
            self.name.clone(),
            self.region.clone(),
            self.country.clone(),
            truncate(&self.notes),
        ]
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", id(self.id)),
            ("Name", self.name.clone()),
            ("Region", self.region.clone()),
            ("Country", self.country.clone()),
            ("Notes", self.notes.clone()),
        ]
    }
}

impl TableRow for Venue {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Address", "Capacity", "Type", "City ID", "Status"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            id(self.id),
            self.name.clone(),
            self.address.clone(),
            self.capacity.to_string(),
            self.venue_type.clone(),
            self.city_id.to_string(),
            self.status.clone(),
        ]
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        Self::headers().iter().copied().zip(self.cells()).collect()
    }
}

impl TableRow for Movie {
    fn headers() -> &'static [&'static str] {
        &["ID", "Title", "Country", "Director", "Duration (min)", "Genre", "Rating", "Synopsis"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            id(self.id),
            self.title.clone(),
            self.country.clone(),
            self.director.clone(),
            self.duration_minutes.to_string(),
            self.genre.clone(),
            self.rating.clone(),
            truncate(&self.synopsis),
        ]
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", id(self.id)),
            ("Title", self.title.clone()),
            ("Country", self.country.clone()),
            ("Director", self.director.clone()),
            ("Duration (min)", self.duration_minutes.to_string()),
            ("Genre", self.genre.clone()),
            ("Rating", self.rating.clone()),
            ("Synopsis", self.synopsis.clone()),
        ]
    }
}

impl TableRow for Screening {
    fn headers() -> &'static [&'static str] {
        &["ID", "Date", "Time", "Price", "Status", "Notes", "Venue ID"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            id(self.id),
            self.date.to_string(),
            self.time.clone(),
            currency(self.ticket_price),
            self.status.clone(),
            truncate(&self.notes),
            self.venue_id.to_string(),
        ]
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", id(self.id)),
            ("Date", self.date.to_string()),
            ("Time", self.time.clone()),
            ("Price", currency(self.ticket_price)),
            ("Status", self.status.clone()),
            ("Notes", self.notes.clone()),
            ("Venue ID", self.venue_id.to_string()),
        ]
    }
}

impl TableRow for Projection {
    fn headers() -> &'static [&'static str] {
        &["Screening ID", "Movie ID", "Position", "Notes"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.screening_id.to_string(),
            self.movie_id.to_string(),
            self.position.to_string(),
            truncate(&self.notes),
        ]
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Screening ID", self.screening_id.to_string()),
            ("Movie ID", self.movie_id.to_string()),
            ("Position", self.position.to_string()),
            ("Notes", self.notes.clone()),
        ]
    }
}

impl TableRow for Attendee {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Email", "Phone", "Age", "City", "Type"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            id(self.id),
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.age.map(|age| age.to_string()).unwrap_or_default(),
            self.city.clone(),
            self.attendee_type.clone(),
        ]
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        Self::headers().iter().copied().zip(self.cells()).collect()
    }
}

impl TableRow for Attendance {
    fn headers() -> &'static [&'static str] {
        &["Screening ID", "Attendee ID", "Tickets", "Purchase date", "Payment", "Notes"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.screening_id.to_string(),
            self.attendee_id.to_string(),
            self.tickets.to_string(),
            self.purchase_date.to_string(),
            self.payment_method.clone(),
            truncate(&self.notes),
        ]
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Screening ID", self.screening_id.to_string()),
            ("Attendee ID", self.attendee_id.to_string()),
            ("Tickets", self.tickets.to_string()),
            ("Purchase date", self.purchase_date.to_string()),
            ("Payment", self.payment_method.clone()),
            ("Notes", self.notes.clone()),
        ]
    }
}

impl TableRow for Jury {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Email", "Specialty", "Country", "Experience (years)", "Type", "Biography"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            id(self.id),
            self.name.clone(),
            self.email.clone(),
            self.specialty.clone(),
            self.country.clone(),
            self.years_experience.to_string(),
            self.jury_type.clone(),
            truncate(&self.bio),
        ]
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", id(self.id)),
            ("Name", self.name.clone()),
            ("Email", self.email.clone()),
            ("Specialty", self.specialty.clone()),
            ("Country", self.country.clone()),
            ("Experience (years)", self.years_experience.to_string()),
            ("Type", self.jury_type.clone()),
            ("Biography", self.bio.clone()),
        ]
    }
}

impl TableRow for JuryParticipation {
    fn headers() -> &'static [&'static str] {
        &["Jury ID", "Screening ID", "Role", "Notes"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.jury_id.to_string(),
            self.screening_id.to_string(),
            self.role.clone(),
            truncate(&self.notes),
        ]
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Jury ID", self.jury_id.to_string()),
            ("Screening ID", self.screening_id.to_string()),
            ("Role", self.role.clone()),
            ("Notes", self.notes.clone()),
        ]
    }
}

impl TableRow for Evaluation {
    /// "Subject ID" is relabelled to the schema's subject column when the table is built.
    fn headers() -> &'static [&'static str] {
        &["Jury ID", "Subject ID", "Score", "Comment", "Date", "Category"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.jury_id.to_string(),
            self.subject_id.to_string(),
            self.score.to_string(),
            truncate(&self.comment),
            optional_date(self.date),
            self.category.clone(),
        ]
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Jury ID", self.jury_id.to_string()),
            ("Subject ID", self.subject_id.to_string()),
            ("Score", self.score.to_string()),
            ("Comment", self.comment.clone()),
            ("Date", optional_date(self.date)),
            ("Category", self.category.clone()),
        ]
    }
}

impl TableRow for Award {
    fn headers() -> &'static [&'static str] {
        &["ID", "Movie ID", "Category", "Edition", "Rank", "Description", "Date"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            id(self.id),
            self.movie_id.to_string(),
            self.category.clone(),
            self.edition.to_string(),
            self.rank.to_string(),
            truncate(&self.description),
            optional_date(self.award_date),
        ]
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", id(self.id)),
            ("Movie ID", self.movie_id.to_string()),
            ("Category", self.category.clone()),
            ("Edition", self.edition.to_string()),
            ("Rank", self.rank.to_string()),
            ("Description", self.description.clone()),
            ("Date", optional_date(self.award_date)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(currency(5000.0), "$5,000");
        assert_eq!(currency(999.4), "$999");
        assert_eq!(currency(1_234_567.0), "$1,234,567");
        assert_eq!(currency(0.0), "$0");
        assert_eq!(currency(-2500.0), "-$2,500");
    }

    #[test]
    fn long_notes_are_cut_at_thirty_characters() {
        assert_eq!(truncate("Short note"), "Short note");
        let exact = "a".repeat(30);
        assert_eq!(truncate(&exact), exact);
        assert_eq!(
            truncate("Función especial con conversatorio del director"),
            "Función especial con conversat..."
        );
    }

    #[test]
    fn every_row_type_fills_each_header() {
        fn check<T: TableRow>(row: T) {
            assert_eq!(row.cells().len(), T::headers().len());
            assert_eq!(row.detail().len(), T::headers().len());
        }

        check(Screening {
            id: Some(4),
            date: date(2025, 3, 14),
            time: "19:30".to_string(),
            ticket_price: 5000.0,
            status: "Scheduled".to_string(),
            notes: "No notes".to_string(),
            venue_id: 2,
        });
        check(Evaluation {
            jury_id: 1,
            subject_id: 2,
            score: 8,
            comment: String::new(),
            date: None,
            category: "General".to_string(),
        });
        check(Award {
            id: None,
            movie_id: 3,
            category: "Best Film".to_string(),
            edition: 1,
            rank: 1,
            description: "No description".to_string(),
            award_date: Some(date(2025, 3, 20)),
        });
    }

    #[test]
    fn screening_cells_are_formatted() {
        let screening = Screening {
            id: Some(4),
            date: date(2025, 3, 14),
            time: "19:30".to_string(),
            ticket_price: 5000.0,
            status: "Scheduled".to_string(),
            notes: "No notes".to_string(),
            venue_id: 2,
        };
        let cells = screening.cells();
        assert_eq!(cells[1], "2025-03-14");
        assert_eq!(cells[3], "$5,000");
    }
}
