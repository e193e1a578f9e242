use health_tracker_data::models::BlobRef;

use crate::entities::blood_pressure::{BloodPressureReading, CreateBloodPressureRequest};
use crate::entities::medicine::{CreateMedicineRequest, Medicine};
use crate::entities::records::{CreateMedicalRecordRequest, CreateReportRequest, MedicalRecord, Report};
use crate::entities::reminder::{parse_time_of_day, CreateReminderRequest, Reminder, ReminderKind};
use crate::entities::sugar::{CreateSugarReadingRequest, SugarReading};

/// Conversion functions from form requests to stored models
/// These follow the pattern convert_to_[model_name] and expect an already
/// validated request; a missing field is still reported rather than assumed.

fn missing(field: &str) -> String {
    format!("Missing required field: {}", field)
}

/// Convert a sugar form into a stored reading
pub fn convert_to_sugar_reading(request: CreateSugarReadingRequest) -> Result<SugarReading, String> {
    Ok(SugarReading {
        date: request.date.ok_or_else(|| missing("date"))?,
        category: request.category.ok_or_else(|| missing("category"))?,
        level: request.level.ok_or_else(|| missing("level"))?,
    })
}

/// Convert a blood pressure form into a stored reading
pub fn convert_to_blood_pressure_reading(
    request: CreateBloodPressureRequest,
) -> Result<BloodPressureReading, String> {
    Ok(BloodPressureReading {
        date: request.date.ok_or_else(|| missing("date"))?,
        systolic: request.systolic.ok_or_else(|| missing("systolic"))?,
        diastolic: request.diastolic.ok_or_else(|| missing("diastolic"))?,
    })
}

/// Convert a medicine form into a stored medicine
pub fn convert_to_medicine(
    request: CreateMedicineRequest,
    last_prescription_file: Option<BlobRef>,
) -> Result<Medicine, String> {
    Ok(Medicine {
        name: request.name.ok_or_else(|| missing("name"))?,
        dosage: request.dosage.ok_or_else(|| missing("dosage"))?,
        frequency: request.frequency.ok_or_else(|| missing("frequency"))?,
        prescription: request.prescription.ok_or_else(|| missing("prescription"))?,
        last_prescription_date: request
            .last_prescription_date
            .ok_or_else(|| missing("lastPrescriptionDate"))?,
        last_prescription_file,
    })
}

/// Convert a medical record form and its stored file into a record
pub fn convert_to_medical_record(
    request: CreateMedicalRecordRequest,
    file: BlobRef,
) -> Result<MedicalRecord, String> {
    Ok(MedicalRecord {
        date: request.date.ok_or_else(|| missing("date"))?,
        title: request.title.ok_or_else(|| missing("title"))?,
        file,
    })
}

/// Convert a report form and its stored file into a report with the given id
pub fn convert_to_report(request: CreateReportRequest, id: String, file: BlobRef) -> Result<Report, String> {
    Ok(Report {
        id,
        category: request.category.ok_or_else(|| missing("category"))?,
        date: request.date.ok_or_else(|| missing("date"))?,
        title: request.title.ok_or_else(|| missing("title"))?,
        file,
    })
}

/// Convert a reminder form into a reminder with the given id
///
/// Medicine reminders drop any date; they recur daily.
pub fn convert_to_reminder(request: CreateReminderRequest, id: String) -> Result<Reminder, String> {
    let kind = request.kind.ok_or_else(|| missing("type"))?;
    let raw_time = request.time.ok_or_else(|| missing("time"))?;
    let time = parse_time_of_day(&raw_time)
        .ok_or_else(|| format!("Invalid time of day: {}", raw_time))?;

    let date = match kind {
        ReminderKind::Appointment => Some(request.date.ok_or_else(|| missing("date"))?),
        ReminderKind::Medicine => None,
    };

    Ok(Reminder {
        id,
        kind,
        title: request.title.ok_or_else(|| missing("title"))?,
        time,
        date,
    })
}
