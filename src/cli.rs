//! Demo walkthrough: wires the in-memory adapters over a small seeded
//! dataset and drives generate → validate → analyze, printing each stage's
//! result to stdout.

use chrono::{TimeZone, Utc, Weekday};
use std::collections::HashMap;
use std::collections::HashSet;

use crate::application::{AssignmentEngine, DiagnosticAnalyzer, SettingsCache, Validator};
use crate::application::ports::{AppointmentRepository, AvailabilityRepository, CareGiverRepository, CareReceiverRepository};
use crate::domain::care_giver::CareGiver;
use crate::domain::care_receiver::CareReceiver;
use crate::domain::geo::GeoCoordinates;
use crate::domain::skill::{Gender, GenderPreference, SkillSet};
use crate::domain::time::ClockTime;
use crate::domain::visit_template::{RecurrenceKind, VisitTemplate};
use crate::infrastructure::memory::{
    InMemoryAppointmentRepository, InMemoryAvailabilityRepository, InMemoryCareGiverRepository,
    InMemoryCareReceiverRepository,
};
use crate::infrastructure::notify::LoggingNotificationPublisher;
use crate::infrastructure::routing::HttpRoutingService;
use crate::application::ports::NotificationPublisher;

pub fn run_demo() {
    println!("=== carecadence ===\n");

    let mut care_givers = InMemoryCareGiverRepository::new();
    let mut care_receivers = InMemoryCareReceiverRepository::new();
    let mut availability = InMemoryAvailabilityRepository::new();
    let mut appointments = InMemoryAppointmentRepository::new();
    let settings_cache = SettingsCache::default();

    let routing = HttpRoutingService::new(crate::config::CONFIG.routing_config())
        .expect("failed to build routing client");
    let notifier = LoggingNotificationPublisher::new();

    let home = GeoCoordinates::new(51.5074, -0.1278).unwrap();
    let jane = CareGiver::new("Jane Doe".to_string(), home, Gender::Female, SkillSet::new()).unwrap();
    let jane_id = care_givers.save(jane).unwrap();

    let mut schedule = HashMap::new();
    for weekday in [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri] {
        schedule.insert(weekday, vec![(ClockTime::new(8, 0).unwrap(), ClockTime::new(18, 0).unwrap())]);
    }
    availability
        .create_version(jane_id, schedule, vec![], Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap())
        .unwrap();

    let mut robert = CareReceiver::new(
        "Robert Smith".to_string(),
        GeoCoordinates::new(51.5099, -0.1180).unwrap(),
        Gender::Male,
        GenderPreference::NoPreference,
    )
    .unwrap();
    robert.add_visit_template(
        VisitTemplate::new(
            0,
            ClockTime::new(9, 0).unwrap(),
            60,
            SkillSet::new(),
            false,
            3,
            [Weekday::Tue, Weekday::Fri].into_iter().collect::<HashSet<_>>(),
            RecurrenceKind::Weekly,
            1,
            None,
        )
        .unwrap(),
    );
    let robert_id = care_receivers.save(robert).unwrap();

    println!("Seeded 1 care giver and 1 care receiver with a twice-weekly visit template.\n");

    println!("-- generate: 2026-01-01..2026-01-10 --");
    let range_start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let range_end = Utc.with_ymd_and_hms(2026, 1, 10, 0, 0, 0).unwrap();
    let (results, summary) = {
        let mut engine = AssignmentEngine::new(
            &mut care_givers,
            &care_receivers,
            &availability,
            &mut appointments,
            &routing,
            settings_cache.get(),
        );
        engine.schedule_many(&[robert_id], range_start, range_end).expect("generate failed")
    };
    for result in &results {
        println!(
            "  receiver {:?}: {} scheduled, {} failed",
            result.care_receiver_id,
            result.scheduled.len(),
            result.failed.len()
        );
    }
    notifier.publish_run_summary(&crate::application::ports::RunSummary {
        total_scheduled: summary.total_scheduled,
        total_failed: summary.total_failed,
        care_receivers_processed: summary.care_receivers_processed,
    });

    println!("\n-- validate: 2026-01-01..2026-01-31 --");
    {
        let mut validator = Validator::new(&care_givers, &care_receivers, &availability, &mut appointments);
        let (summary, _) = validator
            .validate_range(
                Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2026, 1, 31, 0, 0, 0).unwrap(),
            )
            .expect("validate failed");
        println!(
            "  checked {}, invalidated {}, restored {}",
            summary.checked, summary.invalidated, summary.restored
        );
    }

    println!("\n-- analyze: Robert's visit on 2026-01-06 09:00-10:00 --");
    {
        let analyzer = DiagnosticAnalyzer::new(
            &care_givers,
            &care_receivers,
            &availability,
            &appointments,
            &routing,
            settings_cache.get(),
        );
        let reports = analyzer
            .analyze(
                robert_id,
                &SkillSet::new(),
                false,
                Utc.with_ymd_and_hms(2026, 1, 6, 0, 0, 0).unwrap(),
                ClockTime::new(9, 0).unwrap(),
                ClockTime::new(10, 0).unwrap(),
            )
            .expect("analyze failed");
        for report in &reports {
            println!(
                "  {} — can_assign={} score={} distance={:.2}km",
                report.name, report.can_assign, report.match_score, report.distance_km
            );
        }
    }
}
