//! Fixed dataset served whenever the API cannot be reached.

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;

use crate::models::domain::{
    AdminStats, Answer, Badge, LeaderboardEntry, Level, LevelStatus, Material, MaterialStatus,
    MaterialType, ProgressStatus, Question, QuestionOption, QuestionType, Quiz, QuizStatus, Role,
    User, UserProgress,
};
use crate::models::dto::response::{PageMeta, Paginated};

pub const DEMO_USER_ID: i64 = 1;
pub const DEMO_TOKEN: &str = "demo-session-token";
const DEMO_AVATAR: &str = "/placeholder.svg?height=50&width=50";
const BADGE_IMAGE: &str = "/placeholder.svg?height=100&width=100";

pub struct DemoData {
    pub levels: Vec<Level>,
    pub materials: Vec<Material>,
    pub quizzes: Vec<Quiz>,
    pub progress: Vec<UserProgress>,
    pub badges: Vec<Badge>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub admin_stats: AdminStats,
    pub users: Vec<User>,
}

pub static DEMO: Lazy<DemoData> = Lazy::new(build);

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn level(id: i64, name: &str, description: &str, status: LevelStatus, remark: &str) -> Level {
    Level {
        id,
        name: name.to_string(),
        order: id as i32,
        description: description.to_string(),
        status,
        remark: remark.to_string(),
        materials: None,
        quizzes: None,
    }
}

fn material(
    id: i64,
    level_id: i64,
    order: i32,
    title: &str,
    material_type: MaterialType,
    content: &str,
    status: MaterialStatus,
) -> Material {
    Material {
        id,
        level_id,
        title: title.to_string(),
        material_type,
        content: content.trim().to_string(),
        order,
        status,
    }
}

fn choice(
    id: i64,
    quiz_id: i64,
    prompt: &str,
    options: [&str; 4],
    correct: &str,
    explanation: &str,
) -> Question {
    Question {
        id,
        quiz_id,
        prompt: prompt.to_string(),
        question_type: QuestionType::MultipleChoice,
        options: ["a", "b", "c", "d"]
            .iter()
            .zip(options)
            .map(|(key, text)| QuestionOption {
                id: key.to_string(),
                text: text.to_string(),
            })
            .collect(),
        correct_answer: Answer::single(correct),
        explanation: Some(explanation.to_string()),
        points: 10,
    }
}

fn true_false(id: i64, quiz_id: i64, prompt: &str, correct: bool, explanation: &str) -> Question {
    Question {
        id,
        quiz_id,
        prompt: prompt.to_string(),
        question_type: QuestionType::TrueFalse,
        options: vec![
            QuestionOption {
                id: "true".to_string(),
                text: "True".to_string(),
            },
            QuestionOption {
                id: "false".to_string(),
                text: "False".to_string(),
            },
        ],
        correct_answer: Answer::single(if correct { "true" } else { "false" }),
        explanation: Some(explanation.to_string()),
        points: 10,
    }
}

fn badge(id: i64, name: &str, description: &str, criteria: &str, earned_at: Option<DateTime<Utc>>) -> Badge {
    Badge {
        id,
        name: name.to_string(),
        description: description.to_string(),
        image_url: BADGE_IMAGE.to_string(),
        criteria: criteria.to_string(),
        earned_at,
    }
}

fn ranked(user_id: i64, user_name: &str, xp: u32, badges_count: u32, level_completed: u32) -> LeaderboardEntry {
    LeaderboardEntry {
        user_id,
        user_name: user_name.to_string(),
        user_avatar: Some(DEMO_AVATAR.to_string()),
        rank: user_id as u32,
        xp,
        badges_count,
        level_completed,
    }
}

fn member(id: i64, name: &str, email: &str, role: Role, xp: u32, badges: u32, joined_at: DateTime<Utc>) -> User {
    User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        role,
        avatar: Some(DEMO_AVATAR.to_string()),
        xp: Some(xp),
        rank: Some(id as u32),
        badges_count: Some(badges),
        joined_at: Some(joined_at),
    }
}

fn build() -> DemoData {
    use MaterialStatus::{Completed, Reading, Unread};
    use MaterialType::{Image, Text};

    let levels = vec![
        level(
            1,
            "Introduction to Data Structures",
            "Understand the basic ideas behind data structures",
            LevelStatus::Completed,
            "This level is complete",
        ),
        level(
            2,
            "Arrays and Linked Lists",
            "Learn arrays and linked lists",
            LevelStatus::Ongoing,
            "This level is in progress",
        ),
        level(
            3,
            "Stacks and Queues",
            "Learn stacks and queues",
            LevelStatus::Unlocked,
            "This level is open",
        ),
        level(
            4,
            "Trees and Graphs",
            "Learn trees and graphs",
            LevelStatus::Locked,
            "Finish the previous level to unlock this one",
        ),
    ];

    let materials = vec![
        material(
            1,
            1,
            1,
            "What is a Data Structure?",
            Text,
            r#"
# Introduction to Data Structures

A data structure is a way of organising and storing data so that it can be
accessed and modified efficiently. Different structures suit different problems.

## Why do they matter?

1. **Efficiency**: the right structure makes a program faster
2. **Memory**: it helps use memory well
3. **Clarity**: code becomes easier to organise and read

## Kinds of data structures

1. **Primitive**: integer, float, character, boolean
2. **Non-primitive**: array, linked list, stack, queue, tree, graph
"#,
            Completed,
        ),
        material(
            2,
            1,
            2,
            "Algorithm Complexity",
            Text,
            r#"
# Algorithm Complexity

Big O notation describes how the running time or memory use of an algorithm
grows with the size of its input.

- **O(1)**: constant, e.g. reading an array element by index
- **O(log n)**: logarithmic, e.g. binary search
- **O(n)**: linear, e.g. a sequential search
- **O(n²)**: quadratic, e.g. bubble sort
"#,
            Completed,
        ),
        material(
            3,
            1,
            3,
            "Meet the Array",
            Text,
            r#"
# Arrays

An array stores elements of the same type in contiguous memory. Every element
is reached through its index, starting at 0.

```c
int numbers[5] = {10, 20, 30, 40, 50};
printf("%d", numbers[2]); // 30
```

Access by index is O(1); inserting or deleting in the middle is O(n).
"#,
            Reading,
        ),
        material(
            4,
            1,
            4,
            "Visualising Data Structures",
            Image,
            "/placeholder.svg?height=400&width=600",
            Unread,
        ),
        material(
            5,
            2,
            1,
            "One-Dimensional Arrays",
            Text,
            r#"
# One-Dimensional Arrays

A one-dimensional array is a list of elements under a single name.

```c
int scores[4] = {90, 85, 70, 100};
for (int i = 0; i < 4; i++) {
    printf("%d\n", scores[i]);
}
```
"#,
            Reading,
        ),
        material(
            6,
            2,
            2,
            "Multi-Dimensional Arrays",
            Text,
            r#"
# Multi-Dimensional Arrays

A two-dimensional array is an array of arrays and is the natural way to
represent a matrix or a grid.

```c
int matrix[2][3] = {{1, 2, 3}, {4, 5, 6}};
```
"#,
            Unread,
        ),
        material(
            7,
            2,
            3,
            "Introduction to Linked Lists",
            Text,
            r#"
# Linked Lists

A linked list is a chain of nodes. Each node stores a value and a reference to
the next node, so the list can grow and shrink at run time.

```c
struct Node {
    int data;
    struct Node *next;
};
```

Inserting at the head is O(1); reaching the n-th element is O(n).
"#,
            Unread,
        ),
        material(
            8,
            2,
            4,
            "Arrays vs Linked Lists",
            Image,
            "/placeholder.svg?height=400&width=600",
            Unread,
        ),
        material(
            9,
            3,
            1,
            "Introduction to Stacks",
            Text,
            r#"
# Stacks

A stack is a LIFO (last in, first out) structure. Elements are pushed onto and
popped off the top.

- `push(x)`: put x on top
- `pop()`: remove the top element
- `peek()`: read the top element without removing it
"#,
            Unread,
        ),
    ];

    let quizzes = vec![
        Quiz {
            id: 1,
            level_id: 1,
            title: "Quiz: Introduction to Data Structures".to_string(),
            description: "Test your grasp of the basics".to_string(),
            time_limit: 15,
            passing_score: 70,
            status: QuizStatus::Unattempted,
            user_score: None,
            questions: vec![
                choice(
                    1,
                    1,
                    "What is a data structure?",
                    [
                        "A way to organise and store data",
                        "An algorithm for processing data",
                        "A programming language for data",
                        "A file format for storing data",
                    ],
                    "a",
                    "A data structure organises and stores data so it can be used efficiently.",
                ),
                choice(
                    2,
                    1,
                    "Which of these is a primitive data structure?",
                    ["Array", "Linked List", "Integer", "Stack"],
                    "c",
                    "Integer is primitive; the others are built from primitives.",
                ),
                choice(
                    3,
                    1,
                    "What is the time complexity of reading an array element by index?",
                    ["O(1)", "O(log n)", "O(n)", "O(n²)"],
                    "a",
                    "The address of any element is computed directly from its index.",
                ),
                choice(
                    4,
                    1,
                    "Big O notation is used to...",
                    [
                        "Describe the size of a data structure",
                        "Describe the complexity of an algorithm",
                        "Describe the syntax of a language",
                        "Describe a data format",
                    ],
                    "b",
                    "Big O describes how cost grows with input size.",
                ),
                true_false(
                    5,
                    1,
                    "An array has a fixed size once it is declared.",
                    true,
                    "A static array keeps the size it was declared with.",
                ),
            ],
        },
        Quiz {
            id: 2,
            level_id: 2,
            title: "Quiz: Arrays and Linked Lists".to_string(),
            description: "Check what you learned about arrays and linked lists".to_string(),
            time_limit: 20,
            passing_score: 70,
            status: QuizStatus::Unattempted,
            user_score: None,
            questions: vec![
                choice(
                    6,
                    2,
                    "What is the main difference between an array and a linked list?",
                    [
                        "Arrays have a fixed size, linked lists grow dynamically",
                        "Arrays only store numbers, linked lists store anything",
                        "Arrays are faster at every operation",
                        "Arrays only exist in some languages",
                    ],
                    "a",
                    "Linked lists allocate nodes on demand; static arrays do not.",
                ),
                choice(
                    7,
                    2,
                    "Each element of a linked list is called a...",
                    ["Index", "Pointer", "Node", "Element"],
                    "c",
                    "A node holds the value and the link to the next node.",
                ),
                choice(
                    8,
                    2,
                    "Which operation is cheaper on a linked list than on an array?",
                    [
                        "Random access",
                        "Inserting at the head",
                        "Searching for a value",
                        "Reading the last element",
                    ],
                    "b",
                    "Inserting at the head only rewires one reference.",
                ),
                choice(
                    9,
                    2,
                    "A two-dimensional array can represent a...",
                    ["Linked list", "Stack", "Queue", "Matrix"],
                    "d",
                    "Rows and columns map directly onto a matrix.",
                ),
                true_false(
                    10,
                    2,
                    "In a doubly linked list every node references both its next and previous node.",
                    true,
                    "That is what makes it doubly linked.",
                ),
            ],
        },
    ];

    let progress = vec![
        UserProgress {
            user_id: DEMO_USER_ID,
            level_id: 1,
            status: ProgressStatus::Completed,
            progress_percentage: 100,
            completed_materials: vec![1, 2, 3, 4],
            completed_quizzes: vec![1],
            xp_earned: 150,
            last_activity_at: at(2023, 5, 10, 16, 0),
        },
        UserProgress {
            user_id: DEMO_USER_ID,
            level_id: 2,
            status: ProgressStatus::InProgress,
            progress_percentage: 25,
            completed_materials: vec![5],
            completed_quizzes: vec![],
            xp_earned: 50,
            last_activity_at: at(2023, 5, 15, 14, 30),
        },
        UserProgress {
            user_id: DEMO_USER_ID,
            level_id: 3,
            status: ProgressStatus::NotStarted,
            progress_percentage: 0,
            completed_materials: vec![],
            completed_quizzes: vec![],
            xp_earned: 0,
            last_activity_at: at(2023, 5, 15, 14, 30),
        },
    ];

    let badges = vec![
        badge(
            1,
            "Data Structures Beginner",
            "Finished the first level",
            "Complete every material and quiz in Introduction to Data Structures",
            Some(at(2023, 5, 10, 16, 0)),
        ),
        badge(
            2,
            "Quiz Master",
            "Perfect score on a quiz",
            "Score 100 on any quiz",
            Some(at(2023, 5, 10, 16, 0)),
        ),
        badge(
            3,
            "Array Expert",
            "Mastered arrays",
            "Complete every material and quiz about arrays",
            None,
        ),
        badge(
            4,
            "Linked List Explorer",
            "Explored linked lists",
            "Complete every material about linked lists",
            None,
        ),
        badge(
            5,
            "Stack & Queue Specialist",
            "Mastered stacks and queues",
            "Complete every material and quiz about stacks and queues",
            None,
        ),
        badge(
            6,
            "Consistent Learner",
            "Studied five days in a row",
            "Log in and finish at least one material on five consecutive days",
            None,
        ),
    ];

    let leaderboard = vec![
        ranked(1, "Demo User", 250, 2, 1),
        ranked(2, "Budi Santoso", 230, 3, 1),
        ranked(3, "Siti Nurhaliza", 210, 2, 1),
        ranked(4, "Ahmad Rizki", 180, 1, 1),
        ranked(5, "Dewi Lestari", 150, 1, 1),
        ranked(6, "Rudi Hartono", 120, 1, 0),
        ranked(7, "Rina Wijaya", 100, 1, 0),
        ranked(8, "Doni Kusuma", 90, 0, 0),
        ranked(9, "Lia Permata", 80, 0, 0),
        ranked(10, "Bima Sakti", 70, 0, 0),
    ];

    let users = vec![
        member(1, "Demo User", "demo@example.com", Role::Student, 250, 2, at(2023, 4, 15, 10, 0)),
        member(2, "Budi Santoso", "budi@example.com", Role::Student, 230, 3, at(2023, 4, 16, 11, 30)),
        member(3, "Siti Nurhaliza", "siti@example.com", Role::Student, 210, 2, at(2023, 4, 17, 9, 15)),
        member(4, "Ahmad Rizki", "ahmad@example.com", Role::Admin, 180, 1, at(2023, 4, 10, 14, 20)),
        member(5, "Dewi Lestari", "dewi@example.com", Role::Student, 150, 1, at(2023, 4, 20, 16, 45)),
    ];

    DemoData {
        levels,
        materials,
        quizzes,
        progress,
        badges,
        leaderboard,
        admin_stats: AdminStats {
            total_users: 150,
            active_users: 87,
            completed_levels: 210,
            average_quiz_score: 78.5,
            total_badges_earned: 320,
        },
        users,
    }
}

impl DemoData {
    pub fn levels(&self) -> Vec<Level> {
        self.levels.clone()
    }

    /// The level with its materials embedded, or the first level when unknown.
    pub fn level_detail(&self, level_id: i64) -> Level {
        let found = self
            .levels
            .iter()
            .find(|l| l.id == level_id)
            .or_else(|| self.levels.first())
            .cloned()
            .unwrap_or_else(|| level(level_id, "", "", LevelStatus::Locked, ""));
        let materials = self.materials_for(found.id);
        found.with_materials(materials)
    }

    pub fn materials_for(&self, level_id: i64) -> Vec<Material> {
        self.materials
            .iter()
            .filter(|m| m.level_id == level_id)
            .cloned()
            .collect()
    }

    /// That material, else the first. Only an empty dataset yields a blank one.
    pub fn material(&self, material_id: i64) -> Material {
        self.materials
            .iter()
            .find(|m| m.id == material_id)
            .or_else(|| self.materials.first())
            .cloned()
            .unwrap_or_else(|| {
                material(material_id, 0, 1, "", MaterialType::Text, "", MaterialStatus::Unread)
            })
    }

    pub fn quizzes_for(&self, level_id: i64) -> Vec<Quiz> {
        self.quizzes
            .iter()
            .filter(|q| q.level_id == level_id)
            .cloned()
            .collect()
    }

    /// Exact lookup; no substitution.
    pub fn find_quiz(&self, quiz_id: i64) -> Option<&Quiz> {
        self.quizzes.iter().find(|q| q.id == quiz_id)
    }

    pub fn quiz(&self, quiz_id: i64) -> Quiz {
        self.find_quiz(quiz_id)
            .or_else(|| self.quizzes.first())
            .cloned()
            .unwrap_or_else(|| Quiz {
                id: quiz_id,
                level_id: 0,
                title: String::new(),
                description: String::new(),
                time_limit: 1,
                passing_score: 70,
                questions: vec![],
                status: QuizStatus::Unattempted,
                user_score: None,
            })
    }

    pub fn progress(&self, level_id: i64) -> UserProgress {
        self.progress
            .iter()
            .find(|p| p.level_id == level_id)
            .or_else(|| self.progress.first())
            .cloned()
            .unwrap_or_else(|| UserProgress {
                user_id: DEMO_USER_ID,
                level_id,
                status: ProgressStatus::NotStarted,
                progress_percentage: 0,
                completed_materials: vec![],
                completed_quizzes: vec![],
                xp_earned: 0,
                last_activity_at: Utc::now(),
            })
    }

    pub fn badges(&self) -> Vec<Badge> {
        self.badges.clone()
    }

    pub fn leaderboard(&self, limit: u32) -> Vec<LeaderboardEntry> {
        self.leaderboard
            .iter()
            .take(limit as usize)
            .cloned()
            .collect()
    }

    pub fn admin_stats(&self) -> AdminStats {
        self.admin_stats.clone()
    }

    pub fn users_page(&self) -> Paginated<User> {
        Paginated {
            data: self.users.clone(),
            meta: PageMeta {
                current_page: 1,
                last_page: 1,
                per_page: 10,
                total: self.users.len() as u64,
            },
        }
    }

    pub fn user(&self, email: Option<&str>) -> User {
        let mut user = User::new(DEMO_USER_ID, "Demo User", "demo@example.com", Role::Student);
        if let Some(email) = email {
            user.email = email.to_string();
        }
        user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_material_and_quiz_belongs_to_a_level() {
        let level_ids: Vec<i64> = DEMO.levels.iter().map(|l| l.id).collect();

        assert!(DEMO.materials.iter().all(|m| level_ids.contains(&m.level_id)));
        assert!(DEMO.quizzes.iter().all(|q| level_ids.contains(&q.level_id)));
    }

    #[test]
    fn every_answer_key_names_an_option() {
        for question in DEMO.quizzes.iter().flat_map(|q| &q.questions) {
            for id in question.correct_answer.ids() {
                assert!(
                    question.option_text(id).is_some(),
                    "question {} has an answer key outside its options",
                    question.id
                );
            }
        }
    }

    #[test]
    fn stored_progress_matches_material_counts() {
        for row in &DEMO.progress {
            let materials = DEMO.materials_for(row.level_id);
            let expected = crate::progress::progress_percentage(&row.completed_materials, &materials);
            assert_eq!(row.progress_percentage, expected, "level {}", row.level_id);
        }
    }

    #[test]
    fn level_detail_embeds_materials_and_substitutes_unknown_ids() {
        let detail = DEMO.level_detail(2);
        assert_eq!(detail.materials.as_ref().map(Vec::len), Some(4));

        let unknown = DEMO.level_detail(99);
        assert_eq!(unknown.id, 1);
    }

    #[test]
    fn detail_lookups_substitute_the_first_entry() {
        assert_eq!(DEMO.material(6).id, 6);
        assert_eq!(DEMO.material(999).id, DEMO.materials[0].id);
        assert_eq!(DEMO.quiz(999).id, DEMO.quizzes[0].id);
        assert_eq!(DEMO.progress(999).level_id, DEMO.progress[0].level_id);
    }

    #[test]
    fn leaderboard_respects_limit() {
        assert_eq!(DEMO.leaderboard(3).len(), 3);
        assert_eq!(DEMO.leaderboard(50).len(), 10);
    }

    #[test]
    fn users_page_meta() {
        let page = DEMO.users_page();
        assert_eq!(page.meta.total, 5);
        assert_eq!(page.meta.current_page, 1);
        assert_eq!(page.meta.last_page, 1);
        assert_eq!(page.meta.per_page, 10);
    }

    #[test]
    fn only_two_badges_are_earned() {
        assert_eq!(DEMO.badges.iter().filter(|b| b.is_earned()).count(), 2);
    }
}
