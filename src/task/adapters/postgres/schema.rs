//! Diesel schema for the remote task collection.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Store-assigned identifier.
        id -> Uuid,
        /// Task label.
        text -> Text,
        /// Completion flag.
        completed -> Bool,
        /// Deadline exactly as entered.
        #[max_length = 64]
        deadline -> Varchar,
        /// Insertion timestamp, used to keep listing order stable.
        created_at -> Timestamptz,
    }
}
