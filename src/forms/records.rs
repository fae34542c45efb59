use super::{FieldKind, FieldSpec, FormInput, FormValues, Reader, optional};
use crate::{
    error::ValidationError,
    models::{
        Attendance, Attendee, Award, City, Evaluation, Jury, JuryParticipation, Movie, Projection,
        Screening, Venue,
    },
};

const VENUE_TYPES: &[&str] = &["Conventional cinema", "Amphitheatre", "Exhibition hall", "Other"];
const VENUE_STATUSES: &[&str] = &["Active", "Inactive", "Maintenance"];
const GENRES: &[&str] =
    &["Drama", "Action", "Comedy", "Horror", "Science fiction", "Documentary", "Other"];
const RATINGS: &[&str] = &["TE", "+7", "+14", "+18"];
const SCREENING_STATUSES: &[&str] = &["Scheduled", "In progress", "Finished", "Cancelled"];
const ATTENDEE_TYPES: &[&str] = &["General", "Student", "Professional", "Press"];
const PAYMENT_METHODS: &[&str] = &["Cash", "Card", "Transfer"];
const JURY_TYPES: &[&str] = &["Guest", "Permanent", "Honorary"];
const JURY_ROLES: &[&str] = &["Evaluator", "Moderator", "Special guest"];
const CATEGORIES: &[&str] =
    &["General", "Directing", "Acting", "Screenplay", "Cinematography", "Sound"];

const DATE_HINT: &str = "YYYY-MM-DD";
const OPTIONAL_DATE_HINT: &str = "YYYY-MM-DD (optional)";

impl FormInput for City {
    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::text("name", "Name").required(),
            FieldSpec::text("region", "Region"),
            FieldSpec::text("country", "Country").required(),
            FieldSpec::new("notes", "Notes", FieldKind::LongText),
        ];
        FIELDS
    }

    fn from_form(values: &FormValues) -> Result<Self, ValidationError> {
        let form = Reader::new(Self::fields(), values);
        Ok(City {
            id: None,
            name: form.text("name")?,
            region: form.text("region")?,
            country: form.text("country")?,
            notes: form.text("notes")?,
        })
    }

    fn to_form(&self) -> FormValues {
        [
            ("name", self.name.clone()),
            ("region", self.region.clone()),
            ("country", self.country.clone()),
            ("notes", self.notes.clone()),
        ]
        .into_iter()
        .collect()
    }
}

impl FormInput for Venue {
    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::text("name", "Name").required(),
            FieldSpec::text("address", "Address").required(),
            FieldSpec::integer("capacity", "Capacity", 1, 10_000).required().or("100"),
            FieldSpec::choice("venue_type", "Type", VENUE_TYPES),
            FieldSpec::id("city_id", "City ID"),
            FieldSpec::choice("status", "Status", VENUE_STATUSES),
        ];
        FIELDS
    }

    fn from_form(values: &FormValues) -> Result<Self, ValidationError> {
        let form = Reader::new(Self::fields(), values);
        Ok(Venue {
            id: None,
            name: form.text("name")?,
            address: form.text("address")?,
            capacity: form.integer("capacity")?,
            venue_type: form.choice("venue_type")?,
            city_id: form.integer("city_id")?,
            status: form.choice("status")?,
        })
    }

    fn to_form(&self) -> FormValues {
        [
            ("name", self.name.clone()),
            ("address", self.address.clone()),
            ("capacity", self.capacity.to_string()),
            ("venue_type", self.venue_type.clone()),
            ("city_id", self.city_id.to_string()),
            ("status", self.status.clone()),
        ]
        .into_iter()
        .collect()
    }
}

impl FormInput for Movie {
    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::text("title", "Title").required(),
            FieldSpec::text("country", "Country").required(),
            FieldSpec::text("director", "Director").required(),
            FieldSpec::integer("duration_minutes", "Duration (min)", 1, 600).required().or("90"),
            FieldSpec::choice("genre", "Genre", GENRES),
            FieldSpec::choice("rating", "Rating", RATINGS),
            FieldSpec::new("synopsis", "Synopsis", FieldKind::LongText)
                .hint("Short summary of the film")
                .or("No synopsis available"),
        ];
        FIELDS
    }

    fn from_form(values: &FormValues) -> Result<Self, ValidationError> {
        let form = Reader::new(Self::fields(), values);
        Ok(Movie {
            id: None,
            title: form.text("title")?,
            country: form.text("country")?,
            director: form.text("director")?,
            duration_minutes: form.integer("duration_minutes")?,
            genre: form.choice("genre")?,
            rating: form.choice("rating")?,
            synopsis: form.text("synopsis")?,
        })
    }

    fn to_form(&self) -> FormValues {
        [
            ("title", self.title.clone()),
            ("country", self.country.clone()),
            ("director", self.director.clone()),
            ("duration_minutes", self.duration_minutes.to_string()),
            ("genre", self.genre.clone()),
            ("rating", self.rating.clone()),
            ("synopsis", self.synopsis.clone()),
        ]
        .into_iter()
        .collect()
    }
}

impl FormInput for Screening {
    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::new("date", "Date", FieldKind::Date).required().hint(DATE_HINT),
            FieldSpec::new("time", "Time", FieldKind::Time).required().hint("HH:MM"),
            FieldSpec::new("ticket_price", "Ticket price", FieldKind::Decimal)
                .required()
                .hint("5000")
                .or("5000"),
            FieldSpec::choice("status", "Status", SCREENING_STATUSES),
            FieldSpec::new("notes", "Notes", FieldKind::LongText).or("No notes"),
            FieldSpec::id("venue_id", "Venue ID"),
        ];
        FIELDS
    }

    fn from_form(values: &FormValues) -> Result<Self, ValidationError> {
        let form = Reader::new(Self::fields(), values);
        Ok(Screening {
            id: None,
            date: form.date("date")?,
            time: form.time("time")?,
            ticket_price: form.decimal("ticket_price")?,
            status: form.choice("status")?,
            notes: form.text("notes")?,
            venue_id: form.integer("venue_id")?,
        })
    }

    fn to_form(&self) -> FormValues {
        [
            ("date", self.date.to_string()),
            ("time", self.time.clone()),
            ("ticket_price", self.ticket_price.to_string()),
            ("status", self.status.clone()),
            ("notes", self.notes.clone()),
            ("venue_id", self.venue_id.to_string()),
        ]
        .into_iter()
        .collect()
    }
}

impl FormInput for Projection {
    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::id("screening_id", "Screening ID"),
            FieldSpec::id("movie_id", "Movie ID"),
            FieldSpec::integer("position", "Position", 1, 99).required().or("1"),
            FieldSpec::new("notes", "Notes", FieldKind::LongText).or("No comments"),
        ];
        FIELDS
    }

    fn key_fields() -> &'static [&'static str] {
        &["screening_id", "movie_id"]
    }

    fn from_form(values: &FormValues) -> Result<Self, ValidationError> {
        let form = Reader::new(Self::fields(), values);
        Ok(Projection {
            screening_id: form.integer("screening_id")?,
            movie_id: form.integer("movie_id")?,
            position: form.integer("position")?,
            notes: form.text("notes")?,
        })
    }

    fn to_form(&self) -> FormValues {
        [
            ("screening_id", self.screening_id.to_string()),
            ("movie_id", self.movie_id.to_string()),
            ("position", self.position.to_string()),
            ("notes", self.notes.clone()),
        ]
        .into_iter()
        .collect()
    }
}

impl FormInput for Attendee {
    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::text("name", "Name").required(),
            FieldSpec::new("email", "Email", FieldKind::Email).required().hint("name@example.com"),
            FieldSpec::text("phone", "Phone").required().hint("Phone"),
            FieldSpec::integer("age", "Age", 0, 120),
            FieldSpec::text("city", "City").or("Not specified"),
            FieldSpec::choice("attendee_type", "Type", ATTENDEE_TYPES),
        ];
        FIELDS
    }

    fn from_form(values: &FormValues) -> Result<Self, ValidationError> {
        let form = Reader::new(Self::fields(), values);
        Ok(Attendee {
            id: None,
            name: form.text("name")?,
            email: form.email("email")?,
            phone: form.text("phone")?,
            age: form.optional_integer("age")?,
            city: form.text("city")?,
            attendee_type: form.choice("attendee_type")?,
        })
    }

    fn to_form(&self) -> FormValues {
        [
            ("name", self.name.clone()),
            ("email", self.email.clone()),
            ("phone", self.phone.clone()),
            ("age", optional(self.age)),
            ("city", self.city.clone()),
            ("attendee_type", self.attendee_type.clone()),
        ]
        .into_iter()
        .collect()
    }
}

impl FormInput for Attendance {
    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::id("screening_id", "Screening ID"),
            FieldSpec::id("attendee_id", "Attendee ID"),
            FieldSpec::integer("tickets", "Tickets", 1, 100).required().or("1"),
            FieldSpec::new("purchase_date", "Purchase date", FieldKind::Date)
                .hint("YYYY-MM-DD (today if blank)"),
            FieldSpec::choice("payment_method", "Payment method", PAYMENT_METHODS),
            FieldSpec::new("notes", "Notes", FieldKind::LongText).or("No comments"),
        ];
        FIELDS
    }

    fn key_fields() -> &'static [&'static str] {
        &["screening_id", "attendee_id"]
    }

    fn from_form(values: &FormValues) -> Result<Self, ValidationError> {
        let form = Reader::new(Self::fields(), values);
        Ok(Attendance {
            screening_id: form.integer("screening_id")?,
            attendee_id: form.integer("attendee_id")?,
            tickets: form.integer("tickets")?,
            purchase_date: form.date_or_today("purchase_date")?,
            payment_method: form.choice("payment_method")?,
            notes: form.text("notes")?,
        })
    }

    fn to_form(&self) -> FormValues {
        [
            ("screening_id", self.screening_id.to_string()),
            ("attendee_id", self.attendee_id.to_string()),
            ("tickets", self.tickets.to_string()),
            ("purchase_date", self.purchase_date.to_string()),
            ("payment_method", self.payment_method.clone()),
            ("notes", self.notes.clone()),
        ]
        .into_iter()
        .collect()
    }
}

impl FormInput for Jury {
    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::text("name", "Name").required(),
            FieldSpec::new("email", "Email", FieldKind::Email).required().hint("name@example.com"),
            FieldSpec::text("specialty", "Specialty").required(),
            FieldSpec::text("country", "Country").or("Chile"),
            FieldSpec::integer("years_experience", "Experience (years)", 0, 200)
                .required()
                .or("0"),
            FieldSpec::choice("jury_type", "Type", JURY_TYPES),
            FieldSpec::new("bio", "Biography", FieldKind::LongText).or("No biography available"),
        ];
        FIELDS
    }

    fn from_form(values: &FormValues) -> Result<Self, ValidationError> {
        let form = Reader::new(Self::fields(), values);
        Ok(Jury {
            id: None,
            name: form.text("name")?,
            email: form.email("email")?,
            specialty: form.text("specialty")?,
            country: form.text("country")?,
            years_experience: form.integer("years_experience")?,
            jury_type: form.choice("jury_type")?,
            bio: form.text("bio")?,
        })
    }

    fn to_form(&self) -> FormValues {
        [
            ("name", self.name.clone()),
            ("email", self.email.clone()),
            ("specialty", self.specialty.clone()),
            ("country", self.country.clone()),
            ("years_experience", self.years_experience.to_string()),
            ("jury_type", self.jury_type.clone()),
            ("bio", self.bio.clone()),
        ]
        .into_iter()
        .collect()
    }
}

impl FormInput for JuryParticipation {
    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::id("jury_id", "Jury ID"),
            FieldSpec::id("screening_id", "Screening ID"),
            FieldSpec::choice("role", "Role", JURY_ROLES),
            FieldSpec::new("notes", "Notes", FieldKind::LongText).or("No comments"),
        ];
        FIELDS
    }

    fn key_fields() -> &'static [&'static str] {
        &["jury_id", "screening_id"]
    }

    fn from_form(values: &FormValues) -> Result<Self, ValidationError> {
        let form = Reader::new(Self::fields(), values);
        Ok(JuryParticipation {
            jury_id: form.integer("jury_id")?,
            screening_id: form.integer("screening_id")?,
            role: form.choice("role")?,
            notes: form.text("notes")?,
        })
    }

    fn to_form(&self) -> FormValues {
        [
            ("jury_id", self.jury_id.to_string()),
            ("screening_id", self.screening_id.to_string()),
            ("role", self.role.clone()),
            ("notes", self.notes.clone()),
        ]
        .into_iter()
        .collect()
    }
}

impl FormInput for Evaluation {
    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::id("jury_id", "Jury ID"),
            FieldSpec::id("subject_id", "Subject ID"),
            FieldSpec::integer("score", "Score", 1, 10).required().or("5"),
            FieldSpec::new("comment", "Comment", FieldKind::LongText).hint("Comment"),
            FieldSpec::new("date", "Date", FieldKind::Date).hint(OPTIONAL_DATE_HINT),
            FieldSpec::choice("category", "Category", CATEGORIES),
        ];
        FIELDS
    }

    fn key_fields() -> &'static [&'static str] {
        &["jury_id", "subject_id"]
    }

    fn from_form(values: &FormValues) -> Result<Self, ValidationError> {
        let form = Reader::new(Self::fields(), values);
        Ok(Evaluation {
            jury_id: form.integer("jury_id")?,
            subject_id: form.integer("subject_id")?,
            score: form.integer("score")?,
            comment: form.text("comment")?,
            date: form.optional_date("date")?,
            category: form.choice("category")?,
        })
    }

    fn to_form(&self) -> FormValues {
        [
            ("jury_id", self.jury_id.to_string()),
            ("subject_id", self.subject_id.to_string()),
            ("score", self.score.to_string()),
            ("comment", self.comment.clone()),
            ("date", optional(self.date)),
            ("category", self.category.clone()),
        ]
        .into_iter()
        .collect()
    }
}

impl FormInput for Award {
    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::id("movie_id", "Movie ID"),
            FieldSpec::text("category", "Category").required(),
            FieldSpec::integer("edition", "Edition", 1, 99_999).required().or("1"),
            FieldSpec::integer("rank", "Rank", 1, 3).required().or("1"),
            FieldSpec::new("description", "Description", FieldKind::LongText)
                .or("No description"),
            FieldSpec::new("award_date", "Date", FieldKind::Date).hint(OPTIONAL_DATE_HINT),
        ];
        FIELDS
    }

    fn from_form(values: &FormValues) -> Result<Self, ValidationError> {
        let form = Reader::new(Self::fields(), values);
        Ok(Award {
            id: None,
            movie_id: form.integer("movie_id")?,
            category: form.text("category")?,
            edition: form.integer("edition")?,
            rank: form.integer("rank")?,
            description: form.text("description")?,
            award_date: form.optional_date("award_date")?,
        })
    }

    fn to_form(&self) -> FormValues {
        [
            ("movie_id", self.movie_id.to_string()),
            ("category", self.category.clone()),
            ("edition", self.edition.to_string()),
            ("rank", self.rank.to_string()),
            ("description", self.description.clone()),
            ("award_date", optional(self.award_date)),
        ]
        .into_iter()
        .collect()
    }
}
