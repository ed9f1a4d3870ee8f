//! End-to-end run over real files: discovery, per-file processing,
//! cross-file merge, report building, and artifact rendering.

use std::path::{Path, PathBuf};

use attendance_core::config::Config;
use attendance_core::models::{AnomalyReason, Window};
use attendance_data::{discovery, merge, pipeline, roster};
use attendance_report::week::WeekRange;
use attendance_report::{builder, markdown, xlsx};
use calamine::{open_workbook_auto, Reader};
use chrono::NaiveDate;
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Write an attendance workbook shaped like the real export: three banner
/// rows, the header at row 4, data below.
fn write_export(dir: &Path, name: &str, headers: &[&str], rows: &[&[&str]]) -> PathBuf {
    let path = dir.join(name);
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("打卡时间").unwrap();
    worksheet.write_string(0, 0, "某某学校 考勤系统导出").unwrap();
    for (j, h) in headers.iter().enumerate() {
        worksheet.write_string(3, j as u16, *h).unwrap();
    }
    for (i, row) in rows.iter().enumerate() {
        for (j, cell) in row.iter().enumerate() {
            worksheet.write_string(4 + i as u32, j as u16, *cell).unwrap();
        }
    }
    workbook.save(&path).unwrap();
    path
}

#[test]
fn test_full_run_current_file_supersedes_history() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("学生名单.csv"),
        "姓名,学号\n张三,0070123\n李四,0070124\n",
    )
    .unwrap();

    // Historical March export: 张三 has a valid morning session on the 5th.
    write_export(
        dir.path(),
        "3月份总记录.xlsx",
        &["姓名", "5", "六"],
        &[&["张三", "08:00 打卡 08:50补卡", ""]],
    );

    // Current export overlaps the 5th with only one check-in and adds a
    // valid evening session on the 6th (inferred weekend day).
    write_export(
        dir.path(),
        "晨曦班_考勤报表_20240307-20240313.xlsx",
        &["姓名", "5", "六"],
        &[&["张三", "08:00", "19:00 20:10"]],
    );

    let today = date(2024, 3, 13);
    let config = Config::default();
    let students = roster::load_roster(&dir.path().join("学生名单.csv")).unwrap();

    let plan = discovery::plan_sources(dir.path(), today);
    assert_eq!(plan.len(), 2);
    assert_eq!(plan[1].kind, discovery::SourceKind::Current);

    let results: Vec<_> = plan
        .iter()
        .map(|source| pipeline::process_file(source, &students, &config).unwrap())
        .collect();
    let merged = merge::merge_results(results);

    // The current file's single check-in supersedes the historical valid
    // session for (张三, 03-05, morning).
    assert_eq!(merged.valid.len(), 1);
    assert_eq!(merged.valid[0].date, date(2024, 3, 6));
    assert_eq!(merged.valid[0].window, Window::Evening);
    assert_eq!(merged.anomalies.len(), 1);
    assert_eq!(merged.anomalies[0].date, date(2024, 3, 5));
    assert_eq!(
        merged.anomalies[0].reason,
        AnomalyReason::InsufficientCheckins { count: 1 }
    );

    // Week 03-01..03-07 covers both dates.
    let week = WeekRange::containing(date(2024, 3, 7));
    let report = builder::build_report(&merged, &students, week, &config.class_label);

    let zhang = report.rows.iter().find(|r| r.name == "张三").unwrap();
    assert_eq!(zhang.cumulative_count, 1);
    assert_eq!(zhang.weekly_count, 1);
    assert!(zhang.weekly_anomalies.contains("次数不足"));

    // 李四 never checked in but still appears, zero-filled.
    let li = report.rows.iter().find(|r| r.name == "李四").unwrap();
    assert_eq!(li.cumulative_count, 0);
    assert_eq!(li.weekly_anomalies, "");

    // Render both artifacts and read the workbook back.
    let workbook_path = dir.path().join("晨曦计划打卡统计结果_20240313_120000.xlsx");
    let weekly_path = dir.path().join("晨曦计划周报_20240313_120000.md");
    xlsx::write_cumulative_workbook(&report, &workbook_path).unwrap();
    markdown::write_weekly_markdown(&report, &weekly_path).unwrap();

    let mut workbook = open_workbook_auto(&workbook_path).unwrap();
    let range = workbook.worksheet_range("累计打卡统计").unwrap();
    assert_eq!(range.rows().count(), 1 + report.rows.len());

    let md = std::fs::read_to_string(&weekly_path).unwrap();
    assert!(md.contains("# 晨曦计划周报 (2024-03-01 至 2024-03-07)"));
    assert!(md.contains("0070123"));
}

#[test]
fn test_full_run_unreadable_file_skipped() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("学生名单.csv"), "姓名,学号\n张三,001\n").unwrap();

    // A matching filename that is not a workbook at all.
    std::fs::write(dir.path().join("2月份总记录.xlsx"), b"not an xlsx").unwrap();
    write_export(
        dir.path(),
        "3月份总记录.xlsx",
        &["姓名", "5"],
        &[&["张三", "08:00 08:50"]],
    );

    let config = Config::default();
    let students = roster::load_roster(&dir.path().join("学生名单.csv")).unwrap();
    let plan = discovery::plan_sources(dir.path(), date(2024, 3, 13));
    assert_eq!(plan.len(), 2);

    // Mirror the driver's skip-on-error policy.
    let results: Vec<_> = plan
        .iter()
        .filter_map(|source| pipeline::process_file(source, &students, &config).ok())
        .collect();
    assert_eq!(results.len(), 1);

    let merged = merge::merge_results(results);
    assert_eq!(merged.valid.len(), 1);
}
