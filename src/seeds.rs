//! Built-in curriculum so the app is useful without any external config.

use crate::domain::{Lesson, LessonKind, Quiz, Session, DEFAULT_SESSION_MINUTES};

fn lesson(session_id: &str, id: &str, order: u32, title: &str, kind: LessonKind, content: &str) -> Lesson {
  Lesson {
    id: id.into(),
    session_id: session_id.into(),
    order,
    title: title.into(),
    kind,
    content: content.into(),
  }
}

fn quiz(session_id: &str, id: &str, order: u32, question: &str, options: &[&str], answer: usize) -> Quiz {
  Quiz {
    id: id.into(),
    session_id: session_id.into(),
    order,
    question: question.into(),
    options: options.iter().map(|o| o.to_string()).collect(),
    answer,
  }
}

/// Two starter sessions: first steps with `print`, then variables.
pub fn seed_sessions() -> Vec<Session> {
  vec![
    Session {
      id: "s1".into(),
      number: 1,
      title: "Hello, Python".into(),
      description: "What a program is and how to print things.".into(),
      duration_minutes: DEFAULT_SESSION_MINUTES,
      lessons: vec![
        lesson("s1", "s1-l1", 1, "What is a program?", LessonKind::Lesson, SEED_WHAT_IS_A_PROGRAM),
        lesson("s1", "s1-l2", 2, "Your first print", LessonKind::Practice, SEED_FIRST_PRINT),
        lesson("s1", "s1-l3", 3, "Check yourself", LessonKind::Quiz, SEED_SESSION1_QUIZ),
      ],
      quizzes: vec![
        quiz("s1", "s1-q1", 1, "What does `print` do?", &["Shows a value on the screen", "Sends the page to a printer", "Deletes the code"], 0),
        quiz("s1", "s1-q2", 2, "Why do we put text inside quotes?", &["To make it bold", "So Python knows it is text, not a name", "Quotes are optional"], 1),
      ],
    },
    Session {
      id: "s2".into(),
      number: 2,
      title: "Variables".into(),
      description: "Storing values and giving them names.".into(),
      duration_minutes: DEFAULT_SESSION_MINUTES,
      lessons: vec![
        lesson("s2", "s2-l1", 1, "Boxes with names", LessonKind::Lesson, SEED_VARIABLES),
        lesson("s2", "s2-l2", 2, "Swap two values", LessonKind::Practice, SEED_SWAP),
      ],
      quizzes: vec![
        quiz("s2", "s2-q1", 1, "Which name is a valid variable?", &["2nd_place", "my score", "my_score"], 2),
      ],
    },
  ]
}

const SEED_WHAT_IS_A_PROGRAM: &str = "\
# What is a program?

A **program** is a list of instructions that a computer follows *in order*.

> Computers are fast, but they only do exactly what you tell them.

## Where we write code
- the editor on the right side of the screen
- the **Run** button sends your code to Python
";

const SEED_FIRST_PRINT: &str = "\
# Your first print

Type this into the editor and press **Run**:

```python
print(\"Hello, world!\")
```

Now try printing your own name. Text always goes inside quotes, like `\"Mina\"`.
";

const SEED_SESSION1_QUIZ: &str = "\
# Check yourself

Answer the questions below. You can try each question as many times as you like.

1. What does `print` do?
2. Why do we put text inside quotes?
";

const SEED_VARIABLES: &str = "\
# Boxes with names

A **variable** is a name that points to a value.

```python
age = 12
name = \"Mina\"
print(name, age)
```

| Name | Allowed? |
|------|:--------:|
| `age` | yes |
| `my_score` | yes |
| `2nd_place` | no |

### Rules
- start with a letter or `_`
- no spaces
";

const SEED_SWAP: &str = "\
# Swap two values

Python can swap two variables in a single line:

```python
a = 1
b = 2
a, b = b, a
print(a, b)
```

*Challenge:* swap three variables so that `a` gets `b`, `b` gets `c`, and `c` gets `a`.
";
