//! 学生名单导出

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::StudentService;
use crate::errors::{ErpError, Result};
use crate::models::students::entities::Student;
use crate::models::students::requests::{StudentListParams, StudentListQuery};
use crate::services::{error_response, student_scope};

const HEADER: [&str; 13] = [
    "id",
    "admission_number",
    "first_name",
    "last_name",
    "gender",
    "date_of_birth",
    "class_id",
    "roll_number",
    "guardian_name",
    "guardian_phone",
    "address",
    "status",
    "created_at",
];

fn opt<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

pub fn students_to_csv(students: &[Student]) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(HEADER)?;

    for student in students {
        wtr.write_record([
            student.id.to_string(),
            student.admission_number.clone(),
            student.first_name.clone(),
            student.last_name.clone(),
            student.gender.to_string(),
            student.date_of_birth.to_string(),
            opt(&student.class_id),
            opt(&student.roll_number),
            opt(&student.guardian_name),
            opt(&student.guardian_phone),
            opt(&student.address),
            student.status.to_string(),
            student.created_at.to_rfc3339(),
        ])?;
    }

    wtr.into_inner()
        .map_err(|e| ErpError::serialization(format!("CSV generation failed: {e}")))
}

pub async fn export_students(
    service: &StudentService,
    params: StudentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let scope = match student_scope(&storage, request).await {
        Ok(scope) => scope,
        Err(e) => return Ok(error_response(&e)),
    };

    let students = match storage
        .list_all_students(StudentListQuery::from_params(params, scope))
        .await
    {
        Ok(students) => students,
        Err(e) => return Ok(error_response(&e)),
    };

    let data = students_to_csv(&students).map_err(|e| {
        error!("Student export failed: {}", e);
        actix_web::error::ErrorInternalServerError(e.to_string())
    })?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            "attachment; filename=\"students.csv\"",
        ))
        .body(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::entities::{Gender, StudentStatus};
    use chrono::NaiveDate;

    fn student(id: i64, first_name: &str, address: Option<&str>) -> Student {
        Student {
            id,
            admission_number: format!("ADM{id:03}"),
            first_name: first_name.to_string(),
            last_name: "Rao".to_string(),
            gender: Gender::Female,
            date_of_birth: NaiveDate::from_ymd_opt(2012, 5, 17).unwrap(),
            class_id: Some(3),
            roll_number: None,
            guardian_name: None,
            guardian_phone: Some("9876543210".to_string()),
            address: address.map(str::to_string),
            user_id: None,
            parent_user_id: None,
            status: StudentStatus::Active,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_csv_has_header_and_rows() {
        let data = students_to_csv(&[student(1, "Asha", None), student(2, "Meera", None)]).unwrap();
        let text = String::from_utf8(data).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id,admission_number,first_name"));
        assert!(lines[1].starts_with("1,ADM001,Asha,Rao,female,2012-05-17,3,,"));
    }

    #[test]
    fn test_csv_quotes_fields_with_commas() {
        let data = students_to_csv(&[student(1, "Asha", Some("12 MG Road, Pune"))]).unwrap();
        let text = String::from_utf8(data).unwrap();
        assert!(text.contains("\"12 MG Road, Pune\""));
    }
}
