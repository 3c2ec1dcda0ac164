//! 成绩计算
//!
//! 分项得分按权重折算为百分比，再按固定分数段给出等级、绩点和是否及格。

use std::collections::{HashMap, HashSet};

use super::entities::{ComponentMark, ExamResult, MarkComponent, ResultStatus, StudentExamSummary};
use crate::utils::{round2, within_cent};

/// 分数段
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeBand {
    pub min_percentage: f64,
    pub grade: &'static str,
    pub grade_point: f64,
}

/// 分数段从高到低排列，取第一个满足下限的等级
pub const GRADE_LADDER: [GradeBand; 8] = [
    GradeBand { min_percentage: 90.0, grade: "A+", grade_point: 10.0 },
    GradeBand { min_percentage: 80.0, grade: "A", grade_point: 9.0 },
    GradeBand { min_percentage: 70.0, grade: "B+", grade_point: 8.0 },
    GradeBand { min_percentage: 60.0, grade: "B", grade_point: 7.0 },
    GradeBand { min_percentage: 50.0, grade: "C+", grade_point: 6.0 },
    GradeBand { min_percentage: 40.0, grade: "C", grade_point: 5.0 },
    GradeBand { min_percentage: 33.0, grade: "D", grade_point: 4.0 },
    GradeBand { min_percentage: 0.0, grade: "F", grade_point: 0.0 },
];

pub const ABSENT_GRADE: &str = "AB";

pub fn grade_for(percentage: f64) -> GradeBand {
    GRADE_LADDER
        .iter()
        .copied()
        .find(|band| percentage >= band.min_percentage)
        .unwrap_or(GRADE_LADDER[GRADE_LADDER.len() - 1])
}

/// 计算结果（写回成绩记录的派生字段）
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedResult {
    pub total_obtained: f64,
    pub total_max: f64,
    pub percentage: f64,
    pub grade: String,
    pub grade_point: f64,
    pub status: ResultStatus,
}

/// 校验成绩构成：至少一项、满分和权重为正、名称唯一、权重合计 100
pub fn validate_distribution(
    pass_percentage: f64,
    components: &[MarkComponent],
) -> Result<(), String> {
    if !(0.0..=100.0).contains(&pass_percentage) {
        return Err("pass_percentage must be between 0 and 100".to_string());
    }
    if components.is_empty() {
        return Err("mark distribution needs at least one component".to_string());
    }

    let mut names = HashSet::new();
    for component in components {
        let name = component.name.trim();
        if name.is_empty() {
            return Err("component name must not be empty".to_string());
        }
        if component.max_marks <= 0.0 {
            return Err(format!("component '{name}' max_marks must be greater than 0"));
        }
        if component.weightage <= 0.0 {
            return Err(format!("component '{name}' weightage must be greater than 0"));
        }
        if !names.insert(name.to_lowercase()) {
            return Err(format!("duplicate component '{name}'"));
        }
    }

    let total_weight: f64 = components.iter().map(|c| c.weightage).sum();
    if !within_cent(total_weight, 100.0) {
        return Err(format!(
            "component weightages must sum to 100 (got {:.2})",
            total_weight
        ));
    }
    Ok(())
}

/// 根据成绩构成计算单科成绩
pub fn compute_result(
    components: &[MarkComponent],
    pass_percentage: f64,
    marks: &[ComponentMark],
    is_absent: bool,
) -> Result<ComputedResult, String> {
    let total_max: f64 = components.iter().map(|c| c.max_marks).sum();

    if is_absent {
        return Ok(ComputedResult {
            total_obtained: 0.0,
            total_max,
            percentage: 0.0,
            grade: ABSENT_GRADE.to_string(),
            grade_point: 0.0,
            status: ResultStatus::Absent,
        });
    }

    let mut by_name: HashMap<String, f64> = HashMap::with_capacity(marks.len());
    for mark in marks {
        let key = mark.name.trim().to_lowercase();
        if by_name.insert(key, mark.obtained).is_some() {
            return Err(format!("component '{}' entered more than once", mark.name));
        }
    }

    let mut percentage = 0.0;
    let mut total_obtained = 0.0;
    for component in components {
        let obtained = by_name
            .remove(&component.name.trim().to_lowercase())
            .ok_or_else(|| format!("missing marks for component '{}'", component.name))?;
        if !obtained.is_finite() || obtained < 0.0 || obtained > component.max_marks {
            return Err(format!(
                "marks for '{}' must be between 0 and {}",
                component.name, component.max_marks
            ));
        }
        total_obtained += obtained;
        percentage += obtained / component.max_marks * component.weightage;
    }

    if let Some(extra) = by_name.keys().next() {
        return Err(format!("unknown component '{extra}'"));
    }

    let percentage = round2(percentage);
    let band = grade_for(percentage);
    let status = if percentage >= pass_percentage {
        ResultStatus::Pass
    } else {
        ResultStatus::Fail
    };

    Ok(ComputedResult {
        total_obtained: round2(total_obtained),
        total_max,
        percentage,
        grade: band.grade.to_string(),
        grade_point: band.grade_point,
        status,
    })
}

/// 汇总学生一场考试的各科成绩：平均百分比定等级，任一科未通过则整体未通过
pub fn summarize(student_id: i64, exam_id: i64, results: Vec<ExamResult>) -> StudentExamSummary {
    let subjects = results.len();
    let average = if subjects == 0 {
        0.0
    } else {
        round2(results.iter().map(|r| r.percentage).sum::<f64>() / subjects as f64)
    };
    let band = grade_for(average);

    let status = if subjects == 0 || results.iter().all(|r| r.status == ResultStatus::Absent) {
        ResultStatus::Absent
    } else if results.iter().all(|r| r.status == ResultStatus::Pass) {
        ResultStatus::Pass
    } else {
        ResultStatus::Fail
    };

    StudentExamSummary {
        student_id,
        exam_id,
        subjects,
        average_percentage: average,
        grade: band.grade.to_string(),
        grade_point: band.grade_point,
        status,
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(name: &str, max_marks: f64, weightage: f64) -> MarkComponent {
        MarkComponent {
            name: name.to_string(),
            max_marks,
            weightage,
        }
    }

    fn mark(name: &str, obtained: f64) -> ComponentMark {
        ComponentMark {
            name: name.to_string(),
            obtained,
        }
    }

    fn standard() -> Vec<MarkComponent> {
        vec![
            component("Theory", 80.0, 70.0),
            component("Practical", 20.0, 20.0),
            component("Internal", 10.0, 10.0),
        ]
    }

    #[test]
    fn test_grade_ladder_boundaries() {
        let cases = [
            (100.0, "A+"),
            (90.0, "A+"),
            (89.99, "A"),
            (80.0, "A"),
            (70.0, "B+"),
            (60.0, "B"),
            (50.0, "C+"),
            (40.0, "C"),
            (33.0, "D"),
            (32.99, "F"),
            (0.0, "F"),
        ];
        for (percentage, expected) in cases {
            assert_eq!(grade_for(percentage).grade, expected, "{percentage}");
        }
        assert_eq!(grade_for(85.0).grade_point, 9.0);
    }

    #[test]
    fn test_weightages_must_sum_to_100() {
        assert!(validate_distribution(33.0, &standard()).is_ok());
        let thirds = vec![
            component("Unit 1", 10.0, 33.33),
            component("Unit 2", 10.0, 33.33),
            component("Unit 3", 10.0, 33.33),
        ];
        assert!(validate_distribution(33.0, &thirds).is_ok());
        let bad = vec![component("Theory", 80.0, 70.0), component("Practical", 20.0, 20.0)];
        assert!(
            validate_distribution(33.0, &bad)
                .unwrap_err()
                .contains("must sum to 100")
        );
    }

    #[test]
    fn test_distribution_rejects_bad_components() {
        assert!(validate_distribution(33.0, &[]).is_err());
        assert!(validate_distribution(120.0, &standard()).is_err());
        assert!(validate_distribution(33.0, &[component("Theory", 0.0, 100.0)]).is_err());
        assert!(
            validate_distribution(
                33.0,
                &[component("Theory", 50.0, 50.0), component("theory", 50.0, 50.0)]
            )
            .is_err()
        );
    }

    #[test]
    fn test_weighted_percentage() {
        // 60/80*70 + 15/20*20 + 9/10*10 = 52.5 + 15 + 9 = 76.5
        let marks = vec![mark("Theory", 60.0), mark("Practical", 15.0), mark("Internal", 9.0)];
        let result = compute_result(&standard(), 33.0, &marks, false).unwrap();
        assert_eq!(result.percentage, 76.5);
        assert_eq!(result.total_obtained, 84.0);
        assert_eq!(result.total_max, 110.0);
        assert_eq!(result.grade, "B+");
        assert_eq!(result.grade_point, 8.0);
        assert_eq!(result.status, ResultStatus::Pass);
    }

    #[test]
    fn test_fail_below_pass_percentage() {
        let marks = vec![mark("Theory", 20.0), mark("Practical", 5.0), mark("Internal", 2.0)];
        let result = compute_result(&standard(), 33.0, &marks, false).unwrap();
        // 17.5 + 5 + 2 = 24.5
        assert_eq!(result.percentage, 24.5);
        assert_eq!(result.grade, "F");
        assert_eq!(result.status, ResultStatus::Fail);
    }

    #[test]
    fn test_absent_student() {
        let result = compute_result(&standard(), 33.0, &[], true).unwrap();
        assert_eq!(result.grade, ABSENT_GRADE);
        assert_eq!(result.status, ResultStatus::Absent);
        assert_eq!(result.percentage, 0.0);
    }

    #[test]
    fn test_marks_must_match_components() {
        let missing = vec![mark("Theory", 60.0), mark("Practical", 15.0)];
        assert!(compute_result(&standard(), 33.0, &missing, false).is_err());

        let over = vec![mark("Theory", 81.0), mark("Practical", 15.0), mark("Internal", 9.0)];
        assert!(compute_result(&standard(), 33.0, &over, false).is_err());

        let extra = vec![
            mark("Theory", 60.0),
            mark("Practical", 15.0),
            mark("Internal", 9.0),
            mark("Viva", 5.0),
        ];
        assert!(compute_result(&standard(), 33.0, &extra, false).is_err());

        let duplicate = vec![mark("Theory", 60.0), mark("theory", 60.0)];
        assert!(compute_result(&standard(), 33.0, &duplicate, false).is_err());
    }

    fn result_with(percentage: f64, status: ResultStatus) -> ExamResult {
        ExamResult {
            id: 0,
            student_id: 1,
            exam_id: 1,
            subject_id: 1,
            marks: vec![],
            is_absent: status == ResultStatus::Absent,
            total_obtained: 0.0,
            total_max: 0.0,
            percentage,
            grade: grade_for(percentage).grade.to_string(),
            grade_point: 0.0,
            status,
            remarks: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_summary_fails_when_any_subject_fails() {
        let summary = summarize(
            1,
            1,
            vec![
                result_with(95.0, ResultStatus::Pass),
                result_with(25.0, ResultStatus::Fail),
            ],
        );
        assert_eq!(summary.average_percentage, 60.0);
        assert_eq!(summary.grade, "B");
        assert_eq!(summary.status, ResultStatus::Fail);
    }

    #[test]
    fn test_summary_passes_when_all_pass() {
        let summary = summarize(
            1,
            1,
            vec![
                result_with(81.0, ResultStatus::Pass),
                result_with(92.0, ResultStatus::Pass),
            ],
        );
        assert_eq!(summary.average_percentage, 86.5);
        assert_eq!(summary.grade, "A");
        assert_eq!(summary.status, ResultStatus::Pass);
    }
}
