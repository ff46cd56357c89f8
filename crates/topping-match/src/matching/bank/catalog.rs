//! Built-in booth catalog. Prompts and labels are the Hebrew texts shown on
//! the kiosk buttons; option values are the stable identifiers the rest of
//! the system keys on.

use crate::matching::domain::{
    AllergyAnswer, AllergyOption, AllergyQuestion, AnswerOption, Question, QuestionId, QuestionSet,
    Topping,
};

fn question(id: &str, prompt: &str, options: [(&str, &str, Topping); 3]) -> Question {
    Question {
        id: QuestionId::new(id),
        prompt: prompt.to_string(),
        options: options
            .into_iter()
            .map(|(value, label, topping)| AnswerOption {
                value: value.to_string(),
                label: label.to_string(),
                topping,
            })
            .collect(),
    }
}

fn set(questions: [Question; 3]) -> QuestionSet {
    QuestionSet {
        questions: questions.into(),
    }
}

pub(super) fn standard_sets() -> Vec<QuestionSet> {
    vec![
        set([
            question(
                "favorite_animal",
                "מה החיה האהובה עליך? 🐾",
                [
                    ("dog", "כלב 🐶", Topping::Peanuts),
                    ("cat", "חתול 🐱", Topping::Coconut),
                    ("dolphin", "דולפין 🐬", Topping::Sprinkles),
                ],
            ),
            question(
                "favorite_color",
                "מה הצבע האהוב עליך? 🎨",
                [
                    ("pink", "ורוד 💗", Topping::Sprinkles),
                    ("blue", "כחול 🔵", Topping::Coconut),
                    ("red", "אדום 🔴", Topping::Peanuts),
                ],
            ),
            question(
                "favorite_season",
                "עונה מועדפת? ☀️❄️",
                [
                    ("summer", "קיץ ☀️", Topping::Coconut),
                    ("winter", "חורף ❄️", Topping::Peanuts),
                    ("in_between", "בין לבין (אביב/סתיו) 🌸🍂", Topping::Sprinkles),
                ],
            ),
        ]),
        set([
            question(
                "favorite_instrument",
                "איזה כלי נגינה את/ה הכי אוהב/ת? 🎼",
                [
                    ("piano", "פסנתר 🎹", Topping::Coconut),
                    ("guitar", "גיטרה 🎸", Topping::Sprinkles),
                    ("drums", "תופים 🥁", Topping::Peanuts),
                ],
            ),
            question(
                "favorite_food",
                "מה המאכל האהוב עליך? 🍽️",
                [
                    ("pizza", "פיצה 🍕", Topping::Sprinkles),
                    ("sushi", "סושי 🍣", Topping::Coconut),
                    ("burger", "בורגר 🍔", Topping::Peanuts),
                ],
            ),
            question(
                "favorite_superhero",
                "איזה גיבור/ת-על הכי מדבר/ת אליך? 🦸",
                [
                    ("spiderman", "ספיידרמן 🕷️", Topping::Sprinkles),
                    ("wonder_woman", "וונדר וומן 🛡️", Topping::Coconut),
                    ("superman", "סופרמן 🦸‍♂️", Topping::Peanuts),
                ],
            ),
        ]),
        set([
            question(
                "favorite_emoji",
                "מה האימוג׳י האהוב עליך? 😀",
                [
                    ("laughing", "😂", Topping::Sprinkles),
                    ("smiling", "😊", Topping::Coconut),
                    ("flexing", "💪", Topping::Peanuts),
                ],
            ),
            question(
                "favorite_drink",
                "מה המשקה האהוב עליך? ☕🥤",
                [
                    ("coffee", "קפה ☕", Topping::Coconut),
                    ("fruit_shake", "שייק פירות 🥤", Topping::Sprinkles),
                    ("energy_drink", "משקה אנרגיה ⚡", Topping::Peanuts),
                ],
            ),
            question(
                "favorite_meal",
                "מה הארוחה האהובה עליך במשך היום? 🍽️",
                [
                    ("breakfast", "בוקר 🌅", Topping::Coconut),
                    ("lunch", "צהריים 🌞", Topping::Peanuts),
                    ("dinner", "ערב 🌙", Topping::Sprinkles),
                ],
            ),
        ]),
        set([
            question(
                "favorite_snack",
                "נשנוש אהוב? 🧺",
                [
                    ("sweet", "מתוק 🍭", Topping::Sprinkles),
                    ("fruit", "פירות 🍓", Topping::Coconut),
                    ("salty", "מלוח 🥨", Topping::Peanuts),
                ],
            ),
            question(
                "favorite_ride",
                "איך הכי נוח לזוז? 🚗",
                [
                    ("scooter", "קורקינט 🛴", Topping::Sprinkles),
                    ("bicycle", "אופניים 🚲", Topping::Coconut),
                    ("car", "רכב 🚗", Topping::Peanuts),
                ],
            ),
            question(
                "morning_pick",
                "בחירת בוקר מועדפת? 🌅",
                [
                    ("croissant", "קרואסון 🥐", Topping::Sprinkles),
                    ("yogurt_granola", "יוגורט וגרנולה 🥣", Topping::Coconut),
                    ("shakshuka", "שקשוקה 🍳", Topping::Peanuts),
                ],
            ),
        ]),
        set([
            question(
                "favorite_hobby",
                "תחביב מועדף? 🎯",
                [
                    ("art", "ציור/יצירה 🎨", Topping::Sprinkles),
                    ("photography", "צילום 📷", Topping::Coconut),
                    ("running", "ריצה 🏃", Topping::Peanuts),
                ],
            ),
            question(
                "favorite_sport",
                "איזה ספורט כיף לראות? 🏟️",
                [
                    ("basketball", "כדורסל 🏀", Topping::Sprinkles),
                    ("tennis", "טניס 🎾", Topping::Coconut),
                    ("soccer", "כדורגל ⚽", Topping::Peanuts),
                ],
            ),
            question(
                "daily_pace",
                "קצב היום שלך? ⏱️",
                [
                    ("steady", "בינוני 🙂", Topping::Sprinkles),
                    ("relaxed", "איטי ונינוח 🫖", Topping::Coconut),
                    ("fast", "מהיר וממוקד ⚡", Topping::Peanuts),
                ],
            ),
        ]),
    ]
}

pub(super) fn allergy_question() -> AllergyQuestion {
    AllergyQuestion {
        id: QuestionId::new("peanut_allergy"),
        prompt: "האם יש לך אלרגיה או רגישות לבוטנים? 🥜".to_string(),
        options: vec![
            AllergyOption {
                value: "yes".to_string(),
                label: "כן".to_string(),
                answer: AllergyAnswer::Yes,
            },
            AllergyOption {
                value: "no".to_string(),
                label: "לא".to_string(),
                answer: AllergyAnswer::No,
            },
            AllergyOption {
                value: "not_sure".to_string(),
                label: "לא בטוח/ה".to_string(),
                answer: AllergyAnswer::NotSure,
            },
        ],
    }
}
