#![allow(dead_code)]

extern crate std;

use crate::types::Project;

/// Project ids are sequential starting from 1.
pub fn assert_sequential_ids(projects: &[Project]) {
    for (i, project) in projects.iter().enumerate() {
        let expected = i as u64 + 1;
        assert_eq!(
            project.id, expected,
            "expected project id {}, got {}",
            expected, project.id
        );
    }
}

/// A project's start precedes its end.
pub fn assert_valid_dates(project: &Project) {
    assert!(
        project.start < project.end,
        "project {} has start {} not before end {}",
        project.id,
        project.start,
        project.end
    );
}

pub fn assert_funding_target_non_negative(project: &Project) {
    assert!(
        project.funding_target >= 0,
        "project {} has negative funding target ({})",
        project.id,
        project.funding_target
    );
}

/// Fields written at creation never change afterwards.
pub fn assert_project_immutable_fields(original: &Project, current: &Project) {
    assert_eq!(original.id, current.id, "project id changed");
    assert_eq!(original.ong, current.ong, "project owner changed");
    assert_eq!(original.investor, current.investor, "project investor changed");
    assert_eq!(original.title, current.title, "project title changed");
    assert_eq!(original.start, current.start, "project start changed");
    assert_eq!(original.end, current.end, "project end changed");
    assert_eq!(
        original.funding_target, current.funding_target,
        "project funding target changed"
    );
    assert_eq!(
        original.metadata_uri, current.metadata_uri,
        "project metadata uri changed"
    );
}

/// Activity and evidence counters never decrease.
pub fn assert_counters_monotonic(before: &Project, after: &Project) {
    assert!(
        after.activity_count >= before.activity_count,
        "activity_count decreased from {} to {}",
        before.activity_count,
        after.activity_count
    );
    assert!(
        after.evidence_count >= before.evidence_count,
        "evidence_count decreased from {} to {}",
        before.evidence_count,
        after.evidence_count
    );
}

pub fn assert_all_project_invariants(project: &Project) {
    assert_valid_dates(project);
    assert_funding_target_non_negative(project);
}
