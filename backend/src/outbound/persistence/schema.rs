//! Diesel table definitions. Keep in step with `migrations/`.

diesel::table! {
    /// True/false questions. `id` is a serial primary key.
    quizzes (id) {
        id -> Int4,
        question -> Text,
        answer -> Bool,
        author -> Text,
    }
}
