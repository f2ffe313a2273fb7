#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use chrono::Duration;

    use crate::notifications::{ NotificationKind, Notifier, Subscription };
    use crate::tests::support::{ now, setup };

    #[test]
    fn test_subscribers_receive_notifications() {
        setup();
        let notifier = Notifier::default();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let _subscription = notifier.subscribe(move |n| sink.borrow_mut().push(n.message.clone()));

        let id = notifier.notify(NotificationKind::Success, "Letter imported", now());
        notifier.notify(NotificationKind::Warning, "Item C-04 is overdue", now());

        assert_eq!(id, 1);
        assert_eq!(*seen.borrow(), vec!["Letter imported".to_string(), "Item C-04 is overdue".to_string()]);
        assert_eq!(notifier.active().len(), 2);
    }

    #[test]
    fn test_dropping_subscription_unsubscribes() {
        let notifier = Notifier::default();
        let count = Rc::new(RefCell::new(0));

        let sink = Rc::clone(&count);
        let subscription = notifier.subscribe(move |_| {
            *sink.borrow_mut() += 1;
        });
        assert_eq!(notifier.subscriber_count(), 1);

        notifier.notify(NotificationKind::Info, "first", now());
        drop(subscription);
        assert_eq!(notifier.subscriber_count(), 0);

        notifier.notify(NotificationKind::Info, "second", now());
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_subscription_outliving_notifier() {
        let notifier = Notifier::default();
        let subscription = notifier.subscribe(|_| {});
        drop(notifier);
        drop(subscription);
    }

    #[test]
    fn test_expiry_and_dismiss() {
        let notifier = Notifier::new(Duration::seconds(5));
        let first = notifier.notify(NotificationKind::Error, "Sync failed", now());
        notifier.notify(NotificationKind::Info, "Retrying", now() + Duration::seconds(3));

        assert_eq!(notifier.prune_expired(now() + Duration::seconds(4)), 0);
        assert_eq!(notifier.prune_expired(now() + Duration::seconds(5)), 1);
        assert_eq!(notifier.active()[0].message, "Retrying");

        assert!(!notifier.dismiss(first));
        let remaining = notifier.active()[0].id;
        assert!(notifier.dismiss(remaining));
        assert!(notifier.active().is_empty());
    }

    #[test]
    fn test_listener_can_drop_its_own_subscription() {
        setup();
        let notifier = Notifier::default();
        let heard = Rc::new(RefCell::new(Vec::new()));
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let sink = Rc::clone(&heard);
        let own = Rc::clone(&slot);
        let subscription = notifier.subscribe(move |n| {
            sink.borrow_mut().push(n.id);
            // one-shot: unsubscribe after the first delivery
            own.borrow_mut().take();
        });
        *slot.borrow_mut() = Some(subscription);

        let other = Rc::new(RefCell::new(0));
        let other_sink = Rc::clone(&other);
        let _steady = notifier.subscribe(move |_| {
            *other_sink.borrow_mut() += 1;
        });

        let first = notifier.notify(NotificationKind::Info, "Plans uploaded", now());
        notifier.notify(NotificationKind::Info, "Plans approved", now());

        assert_eq!(*heard.borrow(), vec![first]);
        assert_eq!(*other.borrow(), 2);
        assert_eq!(notifier.subscriber_count(), 1);
    }

    #[test]
    fn test_listener_can_read_and_notify() {
        let notifier = Rc::new(Notifier::default());
        let seen_active = Rc::new(RefCell::new(Vec::new()));

        let reader = Rc::downgrade(&notifier);
        let sink = Rc::clone(&seen_active);
        let _subscription = notifier.subscribe(move |n| {
            if let Some(notifier) = reader.upgrade() {
                sink.borrow_mut().push(notifier.active().len());
                if n.kind == NotificationKind::Error {
                    notifier.notify(NotificationKind::Info, "Retry scheduled", n.created_at);
                }
            }
        });

        notifier.notify(NotificationKind::Error, "Upload failed", now());

        // the nested notification is recorded but not delivered to the
        // listener that is still running
        assert_eq!(*seen_active.borrow(), vec![1]);
        let messages: Vec<String> = notifier
            .active()
            .into_iter()
            .map(|n| n.message)
            .collect();
        assert_eq!(messages, vec!["Upload failed".to_string(), "Retry scheduled".to_string()]);
        assert_eq!(notifier.subscriber_count(), 1);

        notifier.notify(NotificationKind::Info, "Upload resumed", now());
        assert_eq!(*seen_active.borrow(), vec![1, 3]);
    }
}
