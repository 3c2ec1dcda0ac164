//! 班级与科目存储操作

use super::{SeaOrmStorage, db_err, fetch_page, now_ts};
use crate::entity::classes::{self, Entity as Classes};
use crate::entity::subjects::{self, Entity as Subjects};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    school::{
        Class, CreateClassRequest, CreateSubjectRequest, SchoolListParams, Subject,
        UpdateClassRequest, UpdateSubjectRequest,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn create_class_impl(&self, req: CreateClassRequest) -> Result<Class> {
        let now = now_ts();
        let model = classes::ActiveModel {
            name: Set(req.name.trim().to_string()),
            section: Set(req.section.trim().to_string()),
            class_teacher_id: Set(req.class_teacher_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("Failed to create class"))?;

        Ok(result.into_class())
    }

    pub async fn get_class_by_id_impl(&self, id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query class"))?;

        Ok(result.map(|m| m.into_class()))
    }

    pub async fn list_classes_impl(
        &self,
        params: SchoolListParams,
    ) -> Result<PaginatedResponse<Class>> {
        let mut select = Classes::find();

        if let Some(ref search) = params.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(classes::Column::Name.contains(&escaped))
                    .add(classes::Column::Section.contains(&escaped)),
            );
        }

        select = select
            .order_by_asc(classes::Column::Name)
            .order_by_asc(classes::Column::Section);

        fetch_page(
            &self.db,
            select,
            params.pagination.bounds(),
            "Failed to list classes",
            |m| m.into_class(),
        )
        .await
    }

    pub async fn update_class_impl(
        &self,
        id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        if self.get_class_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = classes::ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(section) = update.section {
            model.section = Set(section.trim().to_string());
        }
        if let Some(teacher_id) = update.class_teacher_id {
            model.class_teacher_id = Set(Some(teacher_id));
        }

        model
            .update(&self.db)
            .await
            .map_err(db_err("Failed to update class"))?;

        self.get_class_by_id_impl(id).await
    }

    pub async fn delete_class_impl(&self, id: i64) -> Result<bool> {
        let result = Classes::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to delete class"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<Subject> {
        let now = now_ts();
        let model = subjects::ActiveModel {
            name: Set(req.name.trim().to_string()),
            code: Set(req.code.trim().to_uppercase()),
            class_id: Set(req.class_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("Failed to create subject"))?;

        Ok(result.into_subject())
    }

    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query subject"))?;

        Ok(result.map(|m| m.into_subject()))
    }

    pub async fn list_subjects_impl(
        &self,
        params: SchoolListParams,
    ) -> Result<PaginatedResponse<Subject>> {
        let mut select = Subjects::find();

        if let Some(class_id) = params.class_id {
            select = select.filter(subjects::Column::ClassId.eq(class_id));
        }
        if let Some(ref search) = params.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(subjects::Column::Name.contains(&escaped))
                    .add(subjects::Column::Code.contains(&escaped)),
            );
        }

        select = select.order_by_asc(subjects::Column::Code);

        fetch_page(
            &self.db,
            select,
            params.pagination.bounds(),
            "Failed to list subjects",
            |m| m.into_subject(),
        )
        .await
    }

    pub async fn update_subject_impl(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        if self.get_subject_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = subjects::ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(code) = update.code {
            model.code = Set(code.trim().to_uppercase());
        }
        if let Some(class_id) = update.class_id {
            model.class_id = Set(Some(class_id));
        }

        model
            .update(&self.db)
            .await
            .map_err(db_err("Failed to update subject"))?;

        self.get_subject_by_id_impl(id).await
    }

    pub async fn delete_subject_impl(&self, id: i64) -> Result<bool> {
        let result = Subjects::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to delete subject"))?;

        Ok(result.rows_affected > 0)
    }
}
