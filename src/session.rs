use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{error, info, instrument};

use crate::error::{Result, TimetableError};
use crate::metrics::TimetableMetrics;
use crate::store::{AuthToken, ScheduleStore, UploadFile};
use crate::timetable::{normalize, repair, NormalizedTimetable};
use crate::types::RawScheduleEntry;

/// Idle/in-flight flag for one kind of operation
struct OperationGate {
    name: &'static str,
    in_flight: AtomicBool,
}

/// Returns the gate to idle when dropped
struct InFlightGuard<'a> {
    gate: &'a OperationGate,
}

impl OperationGate {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            in_flight: AtomicBool::new(false),
        }
    }

    fn try_begin(&self) -> Result<InFlightGuard<'_>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            TimetableMetrics::record_rejected(self.name);
            return Err(TimetableError::OperationInFlight(self.name));
        }
        Ok(InFlightGuard { gate: self })
    }

    fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.gate.in_flight.store(false, Ordering::Release);
    }
}

/// Upload/refresh workflow around a schedule store.
///
/// Keeps the last successfully normalized timetable. Failed calls leave it
/// untouched; there is no retry.
pub struct TimetableSession {
    store: Arc<dyn ScheduleStore>,
    split_venue_lecturer: bool,
    current: Mutex<Option<Arc<NormalizedTimetable>>>,
    upload_gate: OperationGate,
    refresh_gate: OperationGate,
}

impl std::fmt::Debug for TimetableSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimetableSession")
            .field("store", &"<Arc<dyn ScheduleStore>>")
            .field("split_venue_lecturer", &self.split_venue_lecturer)
            .field("upload_in_flight", &self.upload_gate.is_in_flight())
            .field("refresh_in_flight", &self.refresh_gate.is_in_flight())
            .finish()
    }
}

impl TimetableSession {
    pub fn new(store: Arc<dyn ScheduleStore>) -> Self {
        Self {
            store,
            split_venue_lecturer: false,
            current: Mutex::new(None),
            upload_gate: OperationGate::new("upload"),
            refresh_gate: OperationGate::new("refresh"),
        }
    }

    /// Repair combined `venue, lecturer` values before normalizing
    pub fn with_venue_lecturer_split(mut self, enabled: bool) -> Self {
        self.split_venue_lecturer = enabled;
        self
    }

    /// Last successfully normalized timetable, if any
    pub fn current(&self) -> Option<Arc<NormalizedTimetable>> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_uploading(&self) -> bool {
        self.upload_gate.is_in_flight()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh_gate.is_in_flight()
    }

    /// Normalize rows with this session's ingestion settings
    pub fn normalize_entries(&self, entries: Vec<RawScheduleEntry>) -> NormalizedTimetable {
        let entries = if self.split_venue_lecturer {
            repair::split_venue_lecturer_all(entries)
        } else {
            entries
        };
        normalize(&entries)
    }

    /// Fetch the current rows, normalize them and keep the result
    #[instrument(skip(self, token))]
    pub async fn refresh(&self, token: &AuthToken) -> Result<Arc<NormalizedTimetable>> {
        let _guard = self.refresh_gate.try_begin()?;

        let entries = match self.store.fetch_schedule(token).await {
            Ok(entries) => entries,
            Err(e) => {
                error!("Schedule refresh failed: {}", e);
                TimetableMetrics::record_remote_failure("refresh");
                return Err(e);
            }
        };

        let timetable = Arc::new(self.normalize_entries(entries));
        TimetableMetrics::record_pass(
            &timetable.stats,
            timetable.subject_map.len(),
            timetable.weekly_schedule.total_classes(),
        );
        info!(
            "Timetable refreshed: {} classes ({} lectures, {} tutorials, {} practicals, {} other)",
            timetable.stats.total,
            timetable.stats.lecture,
            timetable.stats.tutorial,
            timetable.stats.practical,
            timetable.stats.generic
        );

        {
            let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
            *current = Some(Arc::clone(&timetable));
        }
        Ok(timetable)
    }

    /// Upload a document, then refresh from the service on success
    #[instrument(skip(self, file, token), fields(file = %file.file_name))]
    pub async fn upload(
        &self,
        file: UploadFile,
        token: &AuthToken,
    ) -> Result<Arc<NormalizedTimetable>> {
        let _guard = self.upload_gate.try_begin()?;

        match self.store.upload_schedule(file, token).await {
            Ok(entries) => info!("Upload accepted, {} rows extracted", entries.len()),
            Err(e) => {
                error!("Schedule upload failed: {}", e);
                TimetableMetrics::record_remote_failure("upload");
                return Err(e);
            }
        }

        self.refresh(token).await
    }
}
