//! Sample festival data for a fresh database. Rows that already exist are
//! matched and reused, so running it again adds nothing.

use anyhow::Context as _;
use jiff::{ToSpan, Zoned, civil::Date};
use tracing::{debug, info};

use crate::{
    error::RepoResult,
    models::{
        Attendance, Attendee, Award, City, Evaluation, Jury, JuryParticipation, Keyed, Movie,
        Projection, Screening, Venue,
    },
    registry::Context,
    repositories::{
        AttendanceRepository, AttendeeRepository, AwardRepository, CityRepository,
        EvaluationRepository, JuryParticipationRepository, JuryRepository, KeyOf,
        MovieRepository, ProjectionRepository, Repository, ScreeningRepository, VenueRepository,
    },
    schema::EvaluationSubject,
};

const NO_NOTES: &str = "No notes";

const CITIES: [(&str, &str, &str); 5] = [
    ("Santiago", "Metropolitana", "Chile"),
    ("Valparaíso", "Valparaíso", "Chile"),
    ("Concepción", "Biobío", "Chile"),
    ("Buenos Aires", "CABA", "Argentina"),
    ("Lima", "Lima Metropolitana", "Peru"),
];

const VENUES: [(&str, &str, i32, &str); 5] = [
    ("Cine Arte Alameda", "Av. Libertador 123", 300, "Conventional cinema"),
    ("Teatro Municipal Valpo", "Calle Bellavista 456", 500, "Amphitheatre"),
    ("Cine Biobío", "Av. Los Carrera 789", 250, "Other"),
    ("Cine Gaumont", "Av. Rivadavia 321", 400, "Other"),
    ("Cine UVK", "Av. Benavides 654", 350, "Conventional cinema"),
];

const MOVIES: [(&str, &str, &str, i32, &str, &str); 5] = [
    ("El Viaje", "Chile", "Juan Pérez", 120, "Drama", "+14"),
    ("Sueños del Mar", "Argentina", "María López", 90, "Other", "TE"),
    ("Luz en la Oscuridad", "Peru", "Carlos Ramírez", 110, "Horror", "+18"),
    ("Camino al Futuro", "Chile", "Ana Torres", 100, "Science fiction", "+7"),
    ("Risas Eternas", "Mexico", "Pedro Sánchez", 95, "Comedy", "TE"),
];

const SHOW_TIMES: [(&str, f64); 5] =
    [("18:00", 5000.0), ("20:00", 6000.0), ("19:30", 4500.0), ("21:00", 7000.0), ("17:00", 5500.0)];

const ATTENDEES: [(&str, &str, &str, i32, &str, &str); 5] = [
    ("Pedro Gómez", "pedro.gomez@mail.com", "9991111", 28, "Santiago", "General"),
    ("Laura Martínez", "laura.martinez@mail.com", "9992222", 22, "Valparaíso", "Student"),
    ("Carlos Ramírez", "carlos.ramirez@mail.com", "9993333", 35, "Concepción", "Professional"),
    ("Ana Torres", "ana.torres@mail.com", "9994444", 30, "Buenos Aires", "Press"),
    ("Sofía Díaz", "sofia.diaz@mail.com", "9995555", 26, "Lima", "General"),
];

/// (screening, attendee, tickets, payment), as positions in the seeded lists.
const PURCHASES: [(usize, usize, i32, &str); 14] = [
    (0, 0, 2, "Card"),
    (1, 1, 1, "Cash"),
    (2, 2, 3, "Transfer"),
    (3, 3, 1, "Card"),
    (4, 4, 2, "Cash"),
    (0, 1, 150, "Card"),
    (0, 2, 130, "Cash"),
    (1, 0, 200, "Card"),
    (1, 3, 100, "Cash"),
    (2, 4, 60, "Transfer"),
    (3, 0, 180, "Cash"),
    (3, 2, 100, "Card"),
    (4, 1, 180, "Transfer"),
    (4, 3, 140, "Card"),
];

const JURORS: [(&str, &str, &str, &str, i32, &str); 5] = [
    ("Dr. Juan Herrera", "juan.herrera@mail.com", "Directing", "Chile", 10, "Permanent"),
    ("María Vega", "maria.vega@mail.com", "Acting", "Argentina", 8, "Guest"),
    ("Ricardo Soto", "ricardo.soto@mail.com", "Screenplay", "Peru", 12, "Honorary"),
    ("Diana Fuentes", "diana.fuentes@mail.com", "Cinematography", "Chile", 15, "Permanent"),
    ("Fernando Ríos", "fernando.rios@mail.com", "Sound", "Mexico", 20, "Guest"),
];

const VERDICTS: [(i32, &str, &str); 5] = [
    (9, "Great direction", "Directing"),
    (8, "Good acting", "Acting"),
    (7, "Interesting story", "Screenplay"),
    (10, "Flawless photography", "Cinematography"),
    (9, "Excellent sound", "Sound"),
];

const AWARDS: [(&str, &str); 5] = [
    ("Best Director", "Award for best direction"),
    ("Best Performance", "Award for best performance"),
    ("Best Screenplay", "Award for best screenplay"),
    ("Best Cinematography", "Award for best cinematography"),
    ("Best Sound", "Award for best sound"),
];

const EDITION: i32 = 2025;

/// Counts the rows it had to insert.
#[derive(Default)]
struct Seeder {
    added: usize,
}

impl Seeder {
    /// Stores each wanted record unless `same` finds it among the rows already
    /// in the table, and returns the keys in the order they were asked for.
    async fn ensure<R: Repository>(
        &mut self,
        repo: &R,
        wanted: Vec<R::Record>,
        same: impl Fn(&R::Record, &R::Record) -> bool,
    ) -> RepoResult<Vec<KeyOf<R>>> {
        let existing = repo.get_all().await?;
        let mut keys = Vec::with_capacity(wanted.len());
        for record in wanted {
            let found = existing.iter().find(|row| same(row, &record)).and_then(Keyed::key);
            let key = match found {
                Some(key) => key,
                None => {
                    self.added += 1;
                    repo.add(&record).await?
                },
            };
            keys.push(key);
        }
        Ok(keys)
    }
}

fn same_key<T: Keyed>(a: &T, b: &T) -> bool {
    a.key() == b.key()
}

/// Fills every table with a small festival. Returns how many rows were inserted.
pub async fn run(context: &Context) -> anyhow::Result<usize> {
    let today = Zoned::now().date();
    run_on(context, today).await
}

async fn run_on(context: &Context, today: Date) -> anyhow::Result<usize> {
    let db = &context.connections;
    let mut seeder = Seeder::default();

    let cities = CITIES
        .iter()
        .map(|&(name, region, country)| City {
            id: None,
            name: name.to_string(),
            region: region.to_string(),
            country: country.to_string(),
            notes: NO_NOTES.to_string(),
        })
        .collect();
    let city_ids = seeder
        .ensure(&CityRepository::new(db.clone()), cities, |a, b| {
            a.name == b.name && a.region == b.region
        })
        .await
        .context("seeding cities")?;

    let venues = VENUES
        .iter()
        .zip(&city_ids)
        .map(|(&(name, address, capacity, venue_type), &city_id)| Venue {
            id: None,
            name: name.to_string(),
            address: address.to_string(),
            capacity,
            venue_type: venue_type.to_string(),
            city_id,
            status: "Active".to_string(),
        })
        .collect();
    let venue_ids = seeder
        .ensure(&VenueRepository::new(db.clone()), venues, |a, b| {
            a.name == b.name && a.city_id == b.city_id
        })
        .await
        .context("seeding venues")?;

    let movies = MOVIES
        .iter()
        .map(|&(title, country, director, duration_minutes, genre, rating)| Movie {
            id: None,
            title: title.to_string(),
            country: country.to_string(),
            director: director.to_string(),
            duration_minutes,
            genre: genre.to_string(),
            rating: rating.to_string(),
            synopsis: "No synopsis available".to_string(),
        })
        .collect();
    let movie_ids = seeder
        .ensure(&MovieRepository::new(db.clone()), movies, |a, b| {
            a.title == b.title && a.director == b.director
        })
        .await
        .context("seeding movies")?;

    let mut screenings = Vec::with_capacity(venue_ids.len());
    for (offset, (&(time, ticket_price), &venue_id)) in
        (0i64..).zip(SHOW_TIMES.iter().zip(&venue_ids))
    {
        screenings.push(Screening {
            id: None,
            date: today.checked_add(offset.days())?,
            time: time.to_string(),
            ticket_price,
            status: "Scheduled".to_string(),
            notes: NO_NOTES.to_string(),
            venue_id,
        });
    }
    let screening_ids = seeder
        .ensure(&ScreeningRepository::new(db.clone()), screenings, |a, b| {
            a.time == b.time && a.venue_id == b.venue_id
        })
        .await
        .context("seeding screenings")?;

    let projections = screening_ids
        .iter()
        .zip(&movie_ids)
        .map(|(&screening_id, &movie_id)| Projection {
            screening_id,
            movie_id,
            position: 1,
            notes: NO_NOTES.to_string(),
        })
        .collect();
    seeder
        .ensure(&ProjectionRepository::new(db.clone()), projections, same_key)
        .await
        .context("seeding projections")?;

    let attendees = ATTENDEES
        .iter()
        .map(|&(name, email, phone, age, city, attendee_type)| Attendee {
            id: None,
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            age: Some(age),
            city: city.to_string(),
            attendee_type: attendee_type.to_string(),
        })
        .collect();
    let attendee_ids = seeder
        .ensure(&AttendeeRepository::new(db.clone()), attendees, |a, b| a.email == b.email)
        .await
        .context("seeding attendees")?;

    let purchases = PURCHASES
        .iter()
        .filter_map(|&(screening, attendee, tickets, payment_method)| {
            Some(Attendance {
                screening_id: *screening_ids.get(screening)?,
                attendee_id: *attendee_ids.get(attendee)?,
                tickets,
                purchase_date: today,
                payment_method: payment_method.to_string(),
                notes: NO_NOTES.to_string(),
            })
        })
        .collect();
    seeder
        .ensure(&AttendanceRepository::new(db.clone()), purchases, same_key)
        .await
        .context("seeding attendance")?;

    let jurors = JURORS
        .iter()
        .map(|&(name, email, specialty, country, years_experience, jury_type)| Jury {
            id: None,
            name: name.to_string(),
            email: email.to_string(),
            specialty: specialty.to_string(),
            country: country.to_string(),
            years_experience,
            jury_type: jury_type.to_string(),
            bio: "No biography available".to_string(),
        })
        .collect();
    let jury_ids = seeder
        .ensure(&JuryRepository::new(db.clone()), jurors, |a, b| a.email == b.email)
        .await
        .context("seeding jury")?;

    let seats = jury_ids
        .iter()
        .zip(&screening_ids)
        .map(|(&jury_id, &screening_id)| JuryParticipation {
            jury_id,
            screening_id,
            role: "Evaluator".to_string(),
            notes: NO_NOTES.to_string(),
        })
        .collect();
    seeder
        .ensure(&JuryParticipationRepository::new(db.clone()), seats, same_key)
        .await
        .context("seeding jury participation")?;

    let subjects = match context.schema.subject {
        EvaluationSubject::Movie => &movie_ids,
        EvaluationSubject::Screening => &screening_ids,
    };
    let evaluations = jury_ids
        .iter()
        .zip(subjects)
        .zip(VERDICTS)
        .map(|((&jury_id, &subject_id), (score, comment, category))| Evaluation {
            jury_id,
            subject_id,
            score,
            comment: comment.to_string(),
            date: Some(today),
            category: category.to_string(),
        })
        .collect();
    let evaluations_repo = EvaluationRepository::new(db.clone(), context.schema.clone());
    seeder.ensure(&evaluations_repo, evaluations, same_key).await.context("seeding evaluations")?;

    let awards = movie_ids
        .iter()
        .zip(AWARDS)
        .map(|(&movie_id, (category, description))| Award {
            id: None,
            movie_id,
            category: category.to_string(),
            edition: EDITION,
            rank: 1,
            description: description.to_string(),
            award_date: Some(today),
        })
        .collect();
    seeder
        .ensure(&AwardRepository::new(db.clone()), awards, |a, b| {
            a.movie_id == b.movie_id && a.category == b.category && a.edition == b.edition
        })
        .await
        .context("seeding awards")?;

    if seeder.added == 0 {
        debug!("sample data already present");
    } else {
        info!(added = seeder.added, "sample data inserted");
    }
    Ok(seeder.added)
}
