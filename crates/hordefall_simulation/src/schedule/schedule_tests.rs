//! Tests for the deferred action queue.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::schedule::*;

    #[test]
    fn test_actions_wait_until_due() {
        let mut queue = ScheduledActions::default();
        queue.schedule(1.0, 1.2, ScheduledAction::FinishReload { serial: 1 });

        assert!(queue.take_due(2.0, ActionLane::Player).is_empty());

        let due = queue.take_due(2.25, ActionLane::Player);
        assert_eq!(due, vec![ScheduledAction::FinishReload { serial: 1 }]);
        assert!(queue.take_due(10.0, ActionLane::Player).is_empty());
    }

    #[test]
    fn test_lanes_are_drained_separately() {
        let mut queue = ScheduledActions::default();
        let enemy = Entity::from_raw(7);
        queue.schedule(0.0, 0.1, ScheduledAction::MeleeStrike);
        queue.schedule(0.0, 0.5, ScheduledAction::EndLunge(enemy));

        assert!(queue.take_due(1.0, ActionLane::Player).is_empty());
        assert_eq!(queue.take_due(1.0, ActionLane::Combat), vec![ScheduledAction::MeleeStrike]);
        assert_eq!(queue.take_due(1.0, ActionLane::Enemy), vec![ScheduledAction::EndLunge(enemy)]);
    }

    #[test]
    fn test_due_order_is_stable() {
        let mut queue = ScheduledActions::default();
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);
        queue.schedule(0.0, 0.5, ScheduledAction::RemoveEnemy(b));
        queue.schedule(0.0, 0.3, ScheduledAction::EndLunge(a));
        queue.schedule(0.0, 0.5, ScheduledAction::RemoveEnemy(a));

        let due = queue.take_due(1.0, ActionLane::Enemy);
        assert_eq!(
            due,
            vec![
                ScheduledAction::EndLunge(a),
                ScheduledAction::RemoveEnemy(b),
                ScheduledAction::RemoveEnemy(a),
            ]
        );
    }

    #[test]
    fn test_cancel_where() {
        let mut queue = ScheduledActions::default();
        let enemy = Entity::from_raw(3);
        queue.schedule(0.0, 0.3, ScheduledAction::EnemyHitRecover(enemy));
        queue.schedule(0.0, 5.0, ScheduledAction::RemoveEnemy(enemy));

        queue.cancel_where(|action| matches!(action, ScheduledAction::EnemyHitRecover(e) if *e == enemy));
        assert_eq!(
            queue.take_due(10.0, ActionLane::Enemy),
            vec![ScheduledAction::RemoveEnemy(enemy)]
        );
    }
}
