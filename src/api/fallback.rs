// file: src/api/fallback.rs
// description: offline sample dataset served when the backend cannot be reached

use crate::models::{Document, DocumentId, Topic};

const TOPICS: &[(i64, &str)] = &[
    (0, "EEG"),
    (1, "Signal Processing"),
    (2, "fMRI"),
    (3, "Alzheimer"),
    (4, "Imaging"),
    (5, "Parkinson"),
    (6, "Biomarkers"),
    (7, "Neuroscience"),
    (8, "Stroke"),
    (9, "Rehabilitation"),
    (10, "Epilepsy"),
    (11, "AI"),
    (12, "Cognitive"),
];

struct Sample {
    id: i64,
    title: &'static str,
    topics: &'static [i64],
    content: &'static str,
    date: &'static str,
    popularity: f64,
    authors: &'static [&'static str],
    year: i32,
}

const SAMPLES: &[Sample] = &[
    Sample {
        id: 1,
        title: "Advances in EEG Signal Processing 2025",
        topics: &[0, 1],
        content: "Recent studies show that deep learning models have revolutionized EEG signal \
                  processing, enabling more accurate classification of brain states and improved \
                  clinical diagnostics.\n\nThis review covers novel algorithms for artifact removal, \
                  feature extraction and real-time analysis of electroencephalography data.",
        date: "2025-01-15",
        popularity: 95.0,
        authors: &["Smith, J.", "Johnson, A."],
        year: 2025,
    },
    Sample {
        id: 2,
        title: "fMRI Analysis Techniques for Alzheimer's Detection",
        topics: &[2, 3, 4],
        content: "Functional magnetic resonance imaging has emerged as a powerful tool for early \
                  detection of Alzheimer's disease through analysis of brain connectivity \
                  patterns.\n\nConnectivity changes in the default mode network can predict \
                  progression years before clinical symptoms appear.",
        date: "2024-12-20",
        popularity: 88.0,
        authors: &["Chen, L.", "Williams, M."],
        year: 2024,
    },
    Sample {
        id: 3,
        title: "Parkinson's Disease Biomarkers in Neuroimaging",
        topics: &[5, 6, 7],
        content: "Identification of reliable biomarkers for Parkinson's disease progression using \
                  multimodal neuroimaging approaches including PET and MRI.\n\nA longitudinal \
                  study of 200 patients tracked dopaminergic function, brain structure and \
                  metabolic activity over three years.",
        date: "2025-01-10",
        popularity: 82.0,
        authors: &["Rodriguez, P.", "Kim, S."],
        year: 2025,
    },
    Sample {
        id: 4,
        title: "Stroke Recovery and Neural Plasticity",
        topics: &[8, 7, 9],
        content: "Understanding mechanisms of neural plasticity following stroke provides insights \
                  into rehabilitation strategies and recovery trajectories.\n\nSuccessful recovery \
                  is associated with recruitment of perilesional cortex and stronger \
                  interhemispheric connections.",
        date: "2024-11-30",
        popularity: 76.0,
        authors: &["Thompson, R.", "Anderson, K."],
        year: 2024,
    },
    Sample {
        id: 5,
        title: "Epilepsy Seizure Prediction Using Deep Learning",
        topics: &[10, 0, 11],
        content: "Deep learning models show promising results in predicting epileptic seizures \
                  minutes before onset using continuous EEG monitoring.\n\nA convolutional network \
                  reaches 89% sensitivity with an average prediction horizon of 15 minutes.",
        date: "2025-01-05",
        popularity: 91.0,
        authors: &["Lee, D.", "Martinez, F."],
        year: 2025,
    },
    Sample {
        id: 6,
        title: "Cognitive Enhancement Through Neurofeedback",
        topics: &[7, 0, 12],
        content: "Neurofeedback training protocols show measurable improvements in attention, \
                  memory and executive function across diverse populations.\n\nA randomized trial \
                  of 120 adults found gains in working memory that persisted at six months.",
        date: "2024-12-15",
        popularity: 79.0,
        authors: &["Garcia, M.", "Brown, T."],
        year: 2024,
    },
];

pub fn documents() -> Vec<Document> {
    SAMPLES
        .iter()
        .map(|s| Document {
            id: DocumentId::from(s.id),
            title: s.title.to_string(),
            content: s.content.to_string(),
            topics: s.topics.to_vec(),
            topic_names: s.topics.iter().filter_map(|t| topic_label(*t)).collect(),
            authors: s.authors.iter().map(|a| a.to_string()).collect(),
            year: Some(s.year),
            doi: None,
            genre: Some("Research".to_string()),
            date_added: Some(s.date.to_string()),
            popularity: Some(s.popularity),
        })
        .collect()
}

pub fn topics() -> Vec<Topic> {
    TOPICS
        .iter()
        .map(|(id, name)| {
            let mut topic = Topic::new(*id, *name, &[]);
            topic.count = SAMPLES.iter().filter(|s| s.topics.contains(id)).count() as u32;
            topic
        })
        .collect()
}

fn topic_label(topic_id: i64) -> Option<String> {
    TOPICS
        .iter()
        .find(|(id, _)| *id == topic_id)
        .map(|(_, name)| name.to_string())
}
