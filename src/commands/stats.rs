use crate::{
    db::db::Db,
    libs::{messages::Message, view::View},
    msg_print,
};
use anyhow::Result;

pub fn cmd(db: &Db) -> Result<()> {
    let stats = db.stats().dashboard_stats()?;

    msg_print!(Message::DashboardHeader, true);
    View::dashboard(&stats);

    if !stats.students_by_course.is_empty() {
        msg_print!(Message::StudentsByCourseHeader, true);
        View::students_by_course(&stats);
    }
    if !stats.monthly_admissions.is_empty() {
        msg_print!(Message::MonthlyAdmissionsHeader, true);
        View::monthly_admissions(&stats);
    }
    Ok(())
}
