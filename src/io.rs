use crate::model::Shift;
use crate::service::NewShift;
use crate::time;
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import de créneaux depuis CSV: header `employee,start,end`
///
/// Les lignes ne sont pas contrôlées ici : elles passent ensuite par
/// `ShiftService::import_shifts`.
pub fn import_shifts_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<NewShift>> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let row = line + 2;
        let employee = rec.get(0).context("missing employee")?;
        if employee.is_empty() {
            bail!("invalid shift row {row} (empty employee)");
        }
        let start = rec.get(1).context("missing start")?;
        let end = rec.get(2).context("missing end")?;
        let start = time::parse_instant(start).with_context(|| format!("start, row {row}"))?;
        let end = time::parse_instant(end).with_context(|| format!("end, row {row}"))?;
        out.push(NewShift::new(employee, start, end));
    }
    Ok(out)
}

/// Export CSV des créneaux: header `id,employee,start,end`
pub fn export_shifts_csv<P: AsRef<Path>>(path: P, shifts: &[Shift]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["id", "employee", "start", "end"])?;
    for s in shifts {
        let start = time::format_utc(s.start);
        let end = time::format_utc(s.end);
        w.write_record([s.id.as_str(), s.employee.as_str(), start.as_str(), end.as_str()])?;
    }
    w.flush()?;
    Ok(())
}

/// Export JSON des créneaux (jolie mise en forme)
pub fn export_shifts_json<P: AsRef<Path>>(path: P, shifts: &[Shift]) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(shifts)?;
    fs::write(path, s)?;
    Ok(())
}
