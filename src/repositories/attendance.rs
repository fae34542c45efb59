use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};
use tracing::debug;

use super::{Repository, pair_condition, parse_date};
use crate::{
    db::ConnectionProvider,
    entities::attendance,
    error::RepoResult,
    models::{Attendance, AttendanceKey},
};

pub struct AttendanceRepository {
    connections: Arc<dyn ConnectionProvider>,
}

impl AttendanceRepository {
    pub fn new(connections: Arc<dyn ConnectionProvider>) -> Self {
        Self { connections }
    }
}

fn to_record(row: attendance::Model) -> RepoResult<Attendance> {
    Ok(Attendance {
        screening_id: row.screening_id,
        attendee_id: row.attendee_id,
        tickets: row.tickets,
        purchase_date: parse_date(&row.purchase_date)?,
        payment_method: row.payment_method,
        notes: row.notes,
    })
}

#[async_trait]
impl Repository for AttendanceRepository {
    type Record = Attendance;

    /// Latest purchases first.
    async fn get_all(&self) -> RepoResult<Vec<Attendance>> {
        let db = self.connections.open().await?;
        let rows = attendance::Entity::find()
            .order_by_desc(attendance::Column::PurchaseDate)
            .order_by_asc(attendance::Column::ScreeningId)
            .order_by_asc(attendance::Column::AttendeeId)
            .all(&db)
            .await?;
        debug!(count = rows.len(), "loaded attendance");
        rows.into_iter().map(to_record).collect()
    }

    async fn get_by_id(&self, key: &AttendanceKey) -> RepoResult<Option<Attendance>> {
        let db = self.connections.open().await?;
        attendance::Entity::find_by_id((key.screening_id, key.attendee_id))
            .one(&db)
            .await?
            .map(to_record)
            .transpose()
    }

    async fn add(&self, attendance: &Attendance) -> RepoResult<AttendanceKey> {
        let db = self.connections.open().await?;
        let row = attendance::ActiveModel {
            screening_id: Set(attendance.screening_id),
            attendee_id: Set(attendance.attendee_id),
            tickets: Set(attendance.tickets),
            purchase_date: Set(attendance.purchase_date.to_string()),
            payment_method: Set(attendance.payment_method.clone()),
            notes: Set(attendance.notes.clone()),
        };
        attendance::Entity::insert(row).exec_without_returning(&db).await?;
        debug!(
            screening_id = attendance.screening_id,
            attendee_id = attendance.attendee_id,
            tickets = attendance.tickets,
            "recorded attendance"
        );
        Ok(AttendanceKey {
            screening_id: attendance.screening_id,
            attendee_id: attendance.attendee_id,
        })
    }

    async fn update(&self, attendance: &Attendance) -> RepoResult<bool> {
        let db = self.connections.open().await?;
        let changes = attendance::ActiveModel {
            screening_id: NotSet,
            attendee_id: NotSet,
            tickets: Set(attendance.tickets),
            purchase_date: Set(attendance.purchase_date.to_string()),
            payment_method: Set(attendance.payment_method.clone()),
            notes: Set(attendance.notes.clone()),
        };
        let result = attendance::Entity::update_many()
            .set(changes)
            .filter(attendance::Column::ScreeningId.eq(attendance.screening_id))
            .filter(attendance::Column::AttendeeId.eq(attendance.attendee_id))
            .exec(&db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_many(&self, keys: &[AttendanceKey]) -> RepoResult<()> {
        if keys.is_empty() {
            return Ok(());
        }
        let db = self.connections.open().await?;
        attendance::Entity::delete_many()
            .filter(pair_condition(
                keys,
                attendance::Column::ScreeningId,
                attendance::Column::AttendeeId,
                |key| (key.screening_id, key.attendee_id),
            ))
            .exec(&db)
            .await?;
        Ok(())
    }
}
