/// Supported sorting algorithms
use crate::error::SortvisError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Algorithm identifier
///
/// Parsed case-insensitively, serialized lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum AlgorithmId {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Heap,
    Counting,
}

impl AlgorithmId {
    /// Every supported algorithm, in menu order
    pub const ALL: [AlgorithmId; 7] = [
        AlgorithmId::Bubble,
        AlgorithmId::Selection,
        AlgorithmId::Insertion,
        AlgorithmId::Merge,
        AlgorithmId::Quick,
        AlgorithmId::Heap,
        AlgorithmId::Counting,
    ];

    /// Wire identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmId::Bubble => "bubble",
            AlgorithmId::Selection => "selection",
            AlgorithmId::Insertion => "insertion",
            AlgorithmId::Merge => "merge",
            AlgorithmId::Quick => "quick",
            AlgorithmId::Heap => "heap",
            AlgorithmId::Counting => "counting",
        }
    }

    /// Whether steps carry a pivot index
    pub fn uses_pivot(&self) -> bool {
        matches!(self, AlgorithmId::Quick)
    }

    /// Whether steps carry an auxiliary buffer
    pub fn uses_auxiliary(&self) -> bool {
        matches!(self, AlgorithmId::Merge | AlgorithmId::Counting)
    }

    /// Display metadata for info panels
    pub fn descriptor(&self) -> AlgorithmDescriptor {
        let (name, description, time_complexity, space_complexity, best_case) = match self {
            AlgorithmId::Bubble => (
                "Bubble Sort",
                "Repeatedly steps through the list, compares adjacent elements and swaps \
                 them if they are in the wrong order, until no swaps are needed.",
                "O(n²)",
                "O(1)",
                "O(n) - when array is already sorted",
            ),
            AlgorithmId::Selection => (
                "Selection Sort",
                "Splits the list into a sorted and an unsorted part and repeatedly moves \
                 the minimum of the unsorted part to the end of the sorted part.",
                "O(n²)",
                "O(1)",
                "O(n²) - even if array is sorted",
            ),
            AlgorithmId::Insertion => (
                "Insertion Sort",
                "Builds the sorted array one item at a time, shifting larger elements \
                 right to open the slot for each new key.",
                "O(n²)",
                "O(1)",
                "O(n) - when array is almost sorted",
            ),
            AlgorithmId::Merge => (
                "Merge Sort",
                "Divides the array into halves, sorts each recursively and merges the \
                 sorted halves through a buffer.",
                "O(n log n)",
                "O(n)",
                "O(n log n) - consistent performance",
            ),
            AlgorithmId::Quick => (
                "Quick Sort",
                "Picks the last element as pivot, partitions the range around it and \
                 recurses into both sides.",
                "O(n log n)",
                "O(log n)",
                "O(n log n) - with good pivot selection",
            ),
            AlgorithmId::Heap => (
                "Heap Sort",
                "Builds a max heap, then repeatedly moves the maximum to the end and \
                 restores the heap on the remainder.",
                "O(n log n)",
                "O(1)",
                "O(n log n) - consistent performance",
            ),
            AlgorithmId::Counting => (
                "Counting Sort",
                "Counts occurrences of each key, turns the counts into positions and \
                 places every element directly. No comparisons between elements.",
                "O(n + k)",
                "O(n + k)",
                "O(n + k) - where k is the range of input",
            ),
        };

        AlgorithmDescriptor {
            id: *self,
            name,
            description,
            time_complexity,
            space_complexity,
            best_case,
        }
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmId {
    type Err = SortvisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        AlgorithmId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SortvisError::invalid_input(format!("unknown algorithm: {:?}", s)))
    }
}

impl TryFrom<String> for AlgorithmId {
    type Error = SortvisError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Info panel metadata for an algorithm
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlgorithmDescriptor {
    pub id: AlgorithmId,
    pub name: &'static str,
    pub description: &'static str,
    pub time_complexity: &'static str,
    pub space_complexity: &'static str,
    pub best_case: &'static str,
}
