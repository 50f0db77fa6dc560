//! Tests for fuzzy clip resolution and AnimationDriver bookkeeping.

#[cfg(test)]
mod tests {
    use crate::animation::*;

    fn clips(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_exact_and_case_insensitive() {
        let set = clips(&["Idle", "pistol_aim"]);
        assert_eq!(resolve_clip(&set, "pistol_aim"), Some("pistol_aim"));
        assert_eq!(resolve_clip(&set, "idle"), Some("Idle"));
    }

    #[test]
    fn test_numeric_suffix_match() {
        let set = clips(&["shotgun_idle", "pistol_walk.001"]);
        assert_eq!(resolve_clip(&set, "pistol_walk"), Some("pistol_walk.001"));
    }

    #[test]
    fn test_all_parts_contained() {
        let set = clips(&["Armature|rifle_run_loop"]);
        assert_eq!(resolve_clip(&set, "rifle_run"), Some("Armature|rifle_run_loop"));
        assert_eq!(resolve_clip(&set, "magnum_run"), None);
    }

    #[test]
    fn test_duplicate_names_get_suffix() {
        let animator = ClipSetAnimator::new(["shotgun_walk", "shotgun_walk", "idle"]);
        assert_eq!(animator.clips(), &["shotgun_walk", "shotgun_walk_1", "idle"]);
    }

    #[test]
    fn test_unknown_clip_falls_back_to_first() {
        let mut animator = ClipSetAnimator::new(["idle", "walk1"]);
        let handle = animator.play("backflip", true).unwrap();
        assert_eq!(handle.clip, "idle");
    }

    #[test]
    fn test_empty_clip_set_reports_not_started() {
        let mut animator = ClipSetAnimator::new(Vec::<String>::new());
        assert!(animator.play("idle", true).is_none());

        let mut driver = AnimationDriver::new(animator);
        assert!(!driver.request_loop("idle"));
        assert_eq!(driver.last_clip(), None);
    }

    #[test]
    fn test_driver_skips_unchanged_and_locked_requests() {
        let mut driver = AnimationDriver::new(ClipSetAnimator::new(["idle", "walk1", "hit1"]));

        assert!(driver.request_loop("idle"));
        assert!(!driver.request_loop("idle"));

        assert!(driver.play_once("hit1"));
        assert!(driver.is_locked());
        assert!(!driver.request_loop("walk1"));
        assert_eq!(driver.last_clip(), Some("hit1"));

        assert!(driver.release("idle"));
        assert!(!driver.is_locked());
        assert!(driver.request_loop("walk1"));
    }
}
