//! Appointment state machine.
//!
//! Pending → Confirmed → Completed | Cancelled, with Pending → Cancelled
//! and Pending → Emergency as the remaining edges. Status only moves
//! forward; records are never deleted.

use soroban_sdk::{Address, Env, String};

use crate::errors::ContractError;
use crate::rbac::{self, Role};
use crate::types::{Appointment, AppointmentStatus, PaymentAsset};
use crate::{events, payments, reentrancy, registry, storage, validation};

/// Books an appointment, settling the doctor's fee first.
///
/// The patient offers `amount` in `asset`; the fee is escrowed and any
/// excess lands on the patient's refund ledger. Runs under the
/// re-entrancy guard because it moves funds.
#[allow(clippy::too_many_arguments)]
pub fn book(
    env: &Env,
    patient: &Address,
    doctor: &Address,
    scheduled_at: u64,
    asset: PaymentAsset,
    amount: i128,
    is_video: bool,
) -> Result<u64, ContractError> {
    reentrancy::non_reentrant(env, || {
        rbac::require_role(env, patient, &Role::Patient)?;
        registry::require_registered_patient(env, patient)?;
        let doctor_record = registry::require_verified_doctor(env, doctor)?;
        validation::validate_lead_time(env, scheduled_at, crate::MIN_BOOKING_LEAD_TIME)?;

        // Payment settles before the record exists; a settlement failure
        // leaves the counter untouched.
        payments::settle(env, patient, &asset, amount, doctor_record.fee)?;

        let id = storage::next_appointment_id(env);
        let record = Appointment {
            id,
            patient: patient.clone(),
            doctor: doctor.clone(),
            scheduled_at,
            status: AppointmentStatus::Pending,
            fee: doctor_record.fee,
            asset: asset.clone(),
            call_link: String::from_str(env, ""),
            is_video,
            booked_at: env.ledger().timestamp(),
        };
        storage::set_appointment(env, &record);
        storage::push_patient_appointment(env, patient, id);

        registry::award_points(env, patient, crate::BOOKING_POINTS)?;

        events::publish_appointment_booked(
            env,
            id,
            patient.clone(),
            doctor.clone(),
            scheduled_at,
            doctor_record.fee,
            asset,
        );

        Ok(id)
    })
}

fn load_for_assigned_doctor(
    env: &Env,
    caller: &Address,
    id: u64,
) -> Result<Appointment, ContractError> {
    rbac::require_role(env, caller, &Role::Doctor)?;
    let record = storage::appointment(env, id)?;
    if record.doctor != *caller {
        return Err(ContractError::Unauthorized);
    }
    Ok(record)
}

/// Pending → Confirmed, by the assigned doctor only.
pub fn confirm(env: &Env, caller: &Address, id: u64) -> Result<(), ContractError> {
    let mut record = load_for_assigned_doctor(env, caller, id)?;
    if record.status != AppointmentStatus::Pending {
        return Err(ContractError::InvalidStatus);
    }
    record.status = AppointmentStatus::Confirmed;
    storage::set_appointment(env, &record);

    events::publish_appointment_confirmed(env, id, caller.clone());
    Ok(())
}

/// Confirmed → Completed, by the assigned doctor only.
pub fn complete(env: &Env, caller: &Address, id: u64) -> Result<(), ContractError> {
    let mut record = load_for_assigned_doctor(env, caller, id)?;
    if record.status != AppointmentStatus::Confirmed {
        return Err(ContractError::InvalidStatus);
    }
    record.status = AppointmentStatus::Completed;
    storage::set_appointment(env, &record);

    events::publish_appointment_completed(env, id, caller.clone());
    Ok(())
}

/// Pending | Confirmed → Cancelled, by the appointment's patient or
/// doctor. The escrowed fee is credited back to the patient's refund
/// ledger rather than pushed out.
pub fn cancel(env: &Env, caller: &Address, id: u64) -> Result<(), ContractError> {
    let mut record = storage::appointment(env, id)?;
    if record.patient != *caller && record.doctor != *caller {
        return Err(ContractError::Unauthorized);
    }
    match record.status {
        AppointmentStatus::Pending | AppointmentStatus::Confirmed => {}
        _ => return Err(ContractError::InvalidStatus),
    }

    record.status = AppointmentStatus::Cancelled;
    storage::set_appointment(env, &record);

    payments::credit_refund(env, &record.patient, &record.asset, record.fee);

    events::publish_appointment_cancelled(env, id, caller.clone());
    Ok(())
}

/// Pending → Emergency, by the assigned doctor only.
pub fn flag_emergency(env: &Env, caller: &Address, id: u64) -> Result<(), ContractError> {
    let mut record = load_for_assigned_doctor(env, caller, id)?;
    if record.status != AppointmentStatus::Pending {
        return Err(ContractError::InvalidStatus);
    }
    record.status = AppointmentStatus::Emergency;
    storage::set_appointment(env, &record);

    events::publish_appointment_emergency(env, id, caller.clone());
    Ok(())
}

/// Attaches the call link to a confirmed video appointment.
pub fn set_call_link(
    env: &Env,
    caller: &Address,
    id: u64,
    link: String,
) -> Result<(), ContractError> {
    validation::validate_text(&link)?;

    let mut record = load_for_assigned_doctor(env, caller, id)?;
    if !record.is_video {
        return Err(ContractError::InvalidInput);
    }
    if record.status != AppointmentStatus::Confirmed {
        return Err(ContractError::InvalidStatus);
    }
    record.call_link = link;
    storage::set_appointment(env, &record);

    events::publish_call_link_set(env, id, caller.clone());
    Ok(())
}
