//! 体检记录存储操作

use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use super::{SeaOrmStorage, db_err, fetch_page, now_ts};
use crate::entity::health_records::{ActiveModel, Column, Entity as HealthRecords};
use crate::errors::{ErpError, Result};
use crate::models::{
    PaginatedResponse,
    common::normalize_page,
    health::{
        CreateHealthRecordRequest, HealthRecord, HealthRecordListQuery,
        UpdateHealthRecordRequest, compute_bmi, validate_checkup_date,
    },
};
use crate::utils::dates::format_date;

impl SeaOrmStorage {
    pub async fn create_health_record_impl(
        &self,
        req: CreateHealthRecordRequest,
        recorded_by: Option<i64>,
        today: NaiveDate,
    ) -> Result<HealthRecord> {
        validate_checkup_date(req.checkup_date, today).map_err(ErpError::validation)?;
        let bmi = compute_bmi(req.height_cm, req.weight_kg).map_err(ErpError::validation)?;

        let now = now_ts();
        let model = ActiveModel {
            student_id: Set(req.student_id),
            checkup_date: Set(format_date(req.checkup_date)),
            height_cm: Set(req.height_cm),
            weight_kg: Set(req.weight_kg),
            bmi: Set(bmi),
            blood_group: Set(req.blood_group.map(|g| g.to_string())),
            allergies: Set(req.allergies),
            notes: Set(req.notes),
            recorded_by: Set(recorded_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("Failed to create health record"))?;

        Ok(result.into_health_record())
    }

    pub async fn get_health_record_by_id_impl(&self, id: i64) -> Result<Option<HealthRecord>> {
        let result = HealthRecords::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query health record"))?;

        Ok(result.map(|m| m.into_health_record()))
    }

    pub async fn list_health_records_impl(
        &self,
        query: HealthRecordListQuery,
    ) -> Result<PaginatedResponse<HealthRecord>> {
        let mut select = HealthRecords::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(ref ids) = query.student_ids {
            select = select.filter(Column::StudentId.is_in(ids.clone()));
        }

        select = select
            .order_by_desc(Column::CheckupDate)
            .order_by_desc(Column::Id);

        fetch_page(
            &self.db,
            select,
            normalize_page(query.page, query.size),
            "Failed to list health records",
            |m| m.into_health_record(),
        )
        .await
    }

    /// 身高或体重变化时重新计算 BMI
    pub async fn update_health_record_impl(
        &self,
        id: i64,
        update: UpdateHealthRecordRequest,
        today: NaiveDate,
    ) -> Result<Option<HealthRecord>> {
        let Some(existing) = self.get_health_record_by_id_impl(id).await? else {
            return Ok(None);
        };

        let height = update.height_cm.unwrap_or(existing.height_cm);
        let weight = update.weight_kg.unwrap_or(existing.weight_kg);
        let bmi = compute_bmi(height, weight).map_err(ErpError::validation)?;

        let mut model = ActiveModel {
            id: Set(id),
            height_cm: Set(height),
            weight_kg: Set(weight),
            bmi: Set(bmi),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(date) = update.checkup_date {
            validate_checkup_date(date, today).map_err(ErpError::validation)?;
            model.checkup_date = Set(format_date(date));
        }
        if let Some(group) = update.blood_group {
            model.blood_group = Set(Some(group.to_string()));
        }
        if let Some(allergies) = update.allergies {
            model.allergies = Set(Some(allergies));
        }
        if let Some(notes) = update.notes {
            model.notes = Set(Some(notes));
        }

        model
            .update(&self.db)
            .await
            .map_err(db_err("Failed to update health record"))?;

        self.get_health_record_by_id_impl(id).await
    }

    pub async fn delete_health_record_impl(&self, id: i64) -> Result<bool> {
        let result = HealthRecords::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to delete health record"))?;

        Ok(result.rows_affected > 0)
    }
}
