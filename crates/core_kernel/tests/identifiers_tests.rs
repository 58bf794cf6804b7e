//! Unit tests for the identifiers module

use core_kernel::{ApiUserId, EmailAddressId, MailingListId, SubmissionId};

mod remote_id_tests {
    use super::*;

    #[test]
    fn test_round_trip_through_u64() {
        let id = MailingListId::new(10);
        let raw: u64 = id.into();
        assert_eq!(raw, 10);
        assert_eq!(MailingListId::from(raw), id);
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert!("abc".parse::<ApiUserId>().is_err());
        assert!("-1".parse::<ApiUserId>().is_err());
    }

    #[test]
    fn test_ordering_follows_numeric_value() {
        let mut ids = vec![MailingListId::new(30), MailingListId::new(10), MailingListId::new(20)];
        ids.sort();
        assert_eq!(ids, vec![MailingListId::new(10), MailingListId::new(20), MailingListId::new(30)]);
    }

    #[test]
    fn test_deserialize_from_number() {
        let id: EmailAddressId = serde_json::from_str("987").unwrap();
        assert_eq!(id.get(), 987);
    }

    #[test]
    fn test_labels() {
        assert_eq!(ApiUserId::label(), "api user");
        assert_eq!(MailingListId::label(), "mailing list");
    }
}

mod submission_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        assert_ne!(SubmissionId::new(), SubmissionId::new());
    }

    #[test]
    fn test_new_ids_are_time_ordered() {
        let first = SubmissionId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = SubmissionId::new();
        assert!(first.as_uuid() < second.as_uuid());
    }
}
