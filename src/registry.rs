//! Which entities the window can open and how each one is assembled.

use std::sync::Arc;

use crate::{
    db::ConnectionProvider,
    panel::{EntityPanel, Panel},
    repositories::{
        AttendanceRepository, AttendeeRepository, AwardRepository, CityRepository,
        EvaluationRepository, JuryParticipationRepository, JuryRepository, MovieRepository,
        ProjectionRepository, ScreeningRepository, VenueRepository,
    },
    schema::EvaluationSchema,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    City,
    Venue,
    Movie,
    Screening,
    Projection,
    Attendee,
    Attendance,
    Jury,
    JuryParticipation,
    Evaluation,
    Award,
}

impl EntityKind {
    pub fn slug(self) -> &'static str {
        match self {
            EntityKind::City => "cities",
            EntityKind::Venue => "venues",
            EntityKind::Movie => "movies",
            EntityKind::Screening => "screenings",
            EntityKind::Projection => "projections",
            EntityKind::Attendee => "attendees",
            EntityKind::Attendance => "attendance",
            EntityKind::Jury => "jury",
            EntityKind::JuryParticipation => "jury-participation",
            EntityKind::Evaluation => "evaluations",
            EntityKind::Award => "awards",
        }
    }

    pub fn label(self) -> &'static str {
        entry(self).label
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        REGISTRY.iter().map(|entry| entry.kind).find(|kind| kind.slug() == slug)
    }
}

/// What a panel needs from the running application.
#[derive(Clone)]
pub struct Context {
    pub connections: Arc<dyn ConnectionProvider>,
    pub schema: EvaluationSchema,
}

pub struct EntityEntry {
    pub kind: EntityKind,
    pub label: &'static str,
    pub open: fn(&Context) -> Box<dyn EntityPanel>,
}

/// In menu order.
pub static REGISTRY: [EntityEntry; 11] = [
    EntityEntry { kind: EntityKind::City, label: "Cities", open: open_cities },
    EntityEntry { kind: EntityKind::Venue, label: "Venues", open: open_venues },
    EntityEntry { kind: EntityKind::Movie, label: "Movies", open: open_movies },
    EntityEntry { kind: EntityKind::Screening, label: "Screenings", open: open_screenings },
    EntityEntry { kind: EntityKind::Projection, label: "Projections", open: open_projections },
    EntityEntry { kind: EntityKind::Attendee, label: "Attendees", open: open_attendees },
    EntityEntry { kind: EntityKind::Attendance, label: "Attendance", open: open_attendance },
    EntityEntry { kind: EntityKind::Jury, label: "Jury", open: open_jury },
    EntityEntry {
        kind: EntityKind::JuryParticipation,
        label: "Jury participation",
        open: open_jury_participation,
    },
    EntityEntry { kind: EntityKind::Evaluation, label: "Evaluations", open: open_evaluations },
    EntityEntry { kind: EntityKind::Award, label: "Awards", open: open_awards },
];

pub fn entry(kind: EntityKind) -> &'static EntityEntry {
    // the table is indexed by declaration order
    &REGISTRY[kind as usize]
}

fn open_cities(ctx: &Context) -> Box<dyn EntityPanel> {
    Box::new(Panel::new(EntityKind::City, CityRepository::new(ctx.connections.clone())))
}

fn open_venues(ctx: &Context) -> Box<dyn EntityPanel> {
    Box::new(Panel::new(EntityKind::Venue, VenueRepository::new(ctx.connections.clone())))
}

fn open_movies(ctx: &Context) -> Box<dyn EntityPanel> {
    Box::new(Panel::new(EntityKind::Movie, MovieRepository::new(ctx.connections.clone())))
}

fn open_screenings(ctx: &Context) -> Box<dyn EntityPanel> {
    let repository = ScreeningRepository::new(ctx.connections.clone());
    Box::new(Panel::new(EntityKind::Screening, repository))
}

fn open_projections(ctx: &Context) -> Box<dyn EntityPanel> {
    let repository = ProjectionRepository::new(ctx.connections.clone());
    Box::new(Panel::new(EntityKind::Projection, repository))
}

fn open_attendees(ctx: &Context) -> Box<dyn EntityPanel> {
    let repository = AttendeeRepository::new(ctx.connections.clone());
    Box::new(Panel::new(EntityKind::Attendee, repository))
}

fn open_attendance(ctx: &Context) -> Box<dyn EntityPanel> {
    let repository = AttendanceRepository::new(ctx.connections.clone());
    Box::new(Panel::new(EntityKind::Attendance, repository))
}

fn open_jury(ctx: &Context) -> Box<dyn EntityPanel> {
    Box::new(Panel::new(EntityKind::Jury, JuryRepository::new(ctx.connections.clone())))
}

fn open_jury_participation(ctx: &Context) -> Box<dyn EntityPanel> {
    let repository = JuryParticipationRepository::new(ctx.connections.clone());
    Box::new(Panel::new(EntityKind::JuryParticipation, repository))
}

fn open_evaluations(ctx: &Context) -> Box<dyn EntityPanel> {
    let repository = EvaluationRepository::new(ctx.connections.clone(), ctx.schema.clone());
    let panel = Panel::new(EntityKind::Evaluation, repository)
        .relabel("Subject ID", ctx.schema.subject.label());
    Box::new(panel)
}

fn open_awards(ctx: &Context) -> Box<dyn EntityPanel> {
    Box::new(Panel::new(EntityKind::Award, AwardRepository::new(ctx.connections.clone())))
}
