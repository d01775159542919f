//! Canned replies for small talk.
//!
//! Before any scoring, the lowercased question is checked against an ordered
//! table of rules. The first rule with a matching substring answers; when
//! none match, the question goes to the relevance scorer.
//!
//! Matching is literal substring containment. `"hi"` therefore also fires on
//! words such as "this" or "which".

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Help,
    Thanks,
}

pub const GREETING_RESPONSE: &str = "Hello! I'm your Physical AI & Humanoid Robotics textbook assistant. You can ask me questions about any of the modules in the book, such as ROS 2, Gazebo, Unity, Isaac, Vision-Language-Action, or the capstone project.";

pub const HELP_RESPONSE: &str = "I can answer questions about the Physical AI & Humanoid Robotics textbook. The book covers 4 modules:\n1. The Robotic Nervous System (ROS 2)\n2. Simulation Environments (Gazebo & Unity)\n3. NVIDIA Isaac\n4. Vision-Language-Action and Capstone\n\nAsk me anything about these topics!";

pub const THANKS_RESPONSE: &str = "You're welcome! Feel free to ask more questions about the Physical AI & Humanoid Robotics textbook.";

/// One entry of the dispatch table.
#[derive(Debug, Clone)]
pub struct Rule {
    pub intent: Intent,
    pub patterns: &'static [&'static str],
    pub response: &'static str,
}

impl Rule {
    /// `lowered` must already be lowercase.
    pub fn matches(&self, lowered: &str) -> bool {
        self.patterns.iter().any(|p| lowered.contains(p))
    }
}

/// Rules in priority order.
pub const DEFAULT_RULES: &[Rule] = &[
    Rule {
        intent: Intent::Greeting,
        patterns: &["hello", "hi", "hey"],
        response: GREETING_RESPONSE,
    },
    Rule {
        intent: Intent::Help,
        patterns: &["help", "what can you do"],
        response: HELP_RESPONSE,
    },
    Rule {
        intent: Intent::Thanks,
        patterns: &["thank", "bye", "thanks"],
        response: THANKS_RESPONSE,
    },
];

/// Return the first rule matching `question`, if any.
pub fn classify<'r>(rules: &'r [Rule], question: &str) -> Option<&'r Rule> {
    let lowered = question.to_lowercase();
    rules.iter().find(|r| r.matches(&lowered))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent_of(q: &str) -> Option<Intent> {
        classify(DEFAULT_RULES, q).map(|r| r.intent)
    }

    #[test]
    fn test_greetings() {
        assert_eq!(intent_of("hello"), Some(Intent::Greeting));
        assert_eq!(intent_of("Hi there"), Some(Intent::Greeting));
        assert_eq!(intent_of("HEY"), Some(Intent::Greeting));
    }

    #[test]
    fn test_help_and_thanks() {
        assert_eq!(intent_of("help"), Some(Intent::Help));
        assert_eq!(intent_of("What can you do?"), Some(Intent::Help));
        assert_eq!(intent_of("thanks"), Some(Intent::Thanks));
        assert_eq!(intent_of("ok bye"), Some(Intent::Thanks));
    }

    #[test]
    fn test_greeting_beats_help() {
        assert_eq!(intent_of("hello, I need help"), Some(Intent::Greeting));
    }

    #[test]
    fn test_help_beats_thanks() {
        assert_eq!(intent_of("thank you for the help"), Some(Intent::Help));
    }

    #[test]
    fn test_substring_inside_word_matches() {
        assert_eq!(intent_of("explain this"), Some(Intent::Greeting));
    }

    #[test]
    fn test_content_question_falls_through() {
        assert_eq!(intent_of("What are topics?"), None);
        assert_eq!(intent_of("Gazebo sensors"), None);
    }

    #[test]
    fn test_custom_rules() {
        let rules = [Rule {
            intent: Intent::Thanks,
            patterns: &["cheers"],
            response: "np",
        }];
        assert_eq!(classify(&rules, "Cheers!").map(|r| r.response), Some("np"));
        assert!(classify(&rules, "hello").is_none());
    }
}
