//! 学籍存储操作

use super::{SeaOrmStorage, db_err, fetch_page, now_ts};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    common::normalize_page,
    students::{
        entities::{Student, StudentStatus},
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
    },
};
use crate::utils::dates::format_date;
use crate::utils::escape_like_pattern;
use crate::utils::validate::normalize_phone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Select, Set,
};

fn apply_filters(mut select: Select<Students>, query: &StudentListQuery) -> Select<Students> {
    if let Some(class_id) = query.class_id {
        select = select.filter(Column::ClassId.eq(class_id));
    }
    if let Some(status) = query.status {
        select = select.filter(Column::Status.eq(status.as_str()));
    }
    if let Some(ref ids) = query.only_ids {
        select = select.filter(Column::Id.is_in(ids.clone()));
    }
    if let Some(ref search) = query.search
        && !search.trim().is_empty()
    {
        let escaped = escape_like_pattern(search.trim());
        select = select.filter(
            Condition::any()
                .add(Column::AdmissionNumber.contains(&escaped))
                .add(Column::FirstName.contains(&escaped))
                .add(Column::LastName.contains(&escaped)),
        );
    }
    select
        .order_by_asc(Column::ClassId)
        .order_by_asc(Column::RollNumber)
        .order_by_asc(Column::Id)
}

impl SeaOrmStorage {
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let now = now_ts();
        let model = ActiveModel {
            admission_number: Set(req.admission_number.trim().to_string()),
            first_name: Set(req.first_name.trim().to_string()),
            last_name: Set(req.last_name.trim().to_string()),
            gender: Set(req.gender.to_string()),
            date_of_birth: Set(format_date(req.date_of_birth)),
            class_id: Set(req.class_id),
            roll_number: Set(req.roll_number),
            guardian_name: Set(req.guardian_name),
            guardian_phone: Set(req.guardian_phone.map(|p| normalize_phone(&p))),
            address: Set(req.address),
            user_id: Set(req.user_id),
            parent_user_id: Set(req.parent_user_id),
            status: Set(StudentStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("Failed to create student"))?;

        Ok(result.into_student())
    }

    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query student"))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn list_students_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<PaginatedResponse<Student>> {
        let select = apply_filters(Students::find(), &query);
        fetch_page(
            &self.db,
            select,
            normalize_page(query.page, query.size),
            "Failed to list students",
            |m| m.into_student(),
        )
        .await
    }

    pub async fn list_all_students_impl(&self, query: StudentListQuery) -> Result<Vec<Student>> {
        let models = apply_filters(Students::find(), &query)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list students"))?;

        Ok(models.into_iter().map(|m| m.into_student()).collect())
    }

    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        if self.get_student_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(first_name) = update.first_name {
            model.first_name = Set(first_name.trim().to_string());
        }
        if let Some(last_name) = update.last_name {
            model.last_name = Set(last_name.trim().to_string());
        }
        if let Some(gender) = update.gender {
            model.gender = Set(gender.to_string());
        }
        if let Some(dob) = update.date_of_birth {
            model.date_of_birth = Set(format_date(dob));
        }
        if let Some(class_id) = update.class_id {
            model.class_id = Set(Some(class_id));
        }
        if let Some(roll) = update.roll_number {
            model.roll_number = Set(Some(roll));
        }
        if let Some(name) = update.guardian_name {
            model.guardian_name = Set(Some(name));
        }
        if let Some(phone) = update.guardian_phone {
            model.guardian_phone = Set(Some(normalize_phone(&phone)));
        }
        if let Some(address) = update.address {
            model.address = Set(Some(address));
        }
        if let Some(user_id) = update.user_id {
            model.user_id = Set(Some(user_id));
        }
        if let Some(parent_user_id) = update.parent_user_id {
            model.parent_user_id = Set(Some(parent_user_id));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(db_err("Failed to update student"))?;

        self.get_student_by_id_impl(id).await
    }

    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let result = Students::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to delete student"))?;

        Ok(result.rows_affected > 0)
    }

    /// 学生账号对应 `user_id`，家长账号对应 `parent_user_id`
    pub async fn list_student_ids_for_user_impl(
        &self,
        user_id: i64,
        as_parent: bool,
    ) -> Result<Vec<i64>> {
        let column = if as_parent {
            Column::ParentUserId
        } else {
            Column::UserId
        };

        Students::find()
            .select_only()
            .column(Column::Id)
            .filter(column.eq(user_id))
            .order_by_asc(Column::Id)
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(db_err("Failed to resolve linked students"))
    }

    pub async fn list_active_students_in_class_impl(&self, class_id: i64) -> Result<Vec<Student>> {
        let models = Students::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Status.eq(StudentStatus::Active.as_str()))
            .order_by_asc(Column::RollNumber)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list class students"))?;

        Ok(models.into_iter().map(|m| m.into_student()).collect())
    }

    /// 返回去重后的号码，格式非法的号码原样保留，由调用方计为发送失败
    pub async fn list_guardian_phones_impl(&self, class_id: Option<i64>) -> Result<Vec<String>> {
        let mut select = Students::find()
            .select_only()
            .column(Column::GuardianPhone)
            .filter(Column::Status.eq(StudentStatus::Active.as_str()))
            .filter(Column::GuardianPhone.is_not_null());
        if let Some(class_id) = class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }

        let phones = select
            .order_by_asc(Column::Id)
            .into_tuple::<Option<String>>()
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list guardian phones"))?;

        let mut seen = std::collections::HashSet::new();
        Ok(phones
            .into_iter()
            .flatten()
            .map(|p| normalize_phone(&p))
            .filter(|p| !p.is_empty())
            .filter(|p| seen.insert(p.clone()))
            .collect())
    }
}

