// `id` is mapped to BigInt by hand; SQLite INTEGER PRIMARY KEY is a 64-bit rowid.

diesel::table! {
    workout_logs (id) {
        id -> BigInt,
        workout_date -> Text,
        exercise -> Text,
        sets -> Integer,
        reps -> Integer,
        weight -> Double,
        volume -> Double,
    }
}
