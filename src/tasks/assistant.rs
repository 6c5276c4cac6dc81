//! AI analysis over the caller's task list. Stateless: the client submits
//! the tasks it wants analysed and nothing is persisted here.

use axum::{debug_handler, extract::State, Json};
use serde::{Deserialize, Serialize};
use time::{macros::format_description, Date, OffsetDateTime};

use crate::{
    ai::{AiClients, ChatMessage},
    AppError, AppResult, AppState,
};

const ASSISTANT_MAX_TOKENS: u32 = 2000;

/// Task rows as the task-manager UI submits them.
#[derive(Debug, Clone, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AssistantRequest {
    /// Decoded loosely so that a missing or non-array value is rejected
    /// with the API's own error shape instead of the framework's.
    tasks: Option<serde_json::Value>,
    #[serde(default)]
    analysis_type: String,
}

#[derive(Serialize)]
pub(super) struct AssistantResponse {
    response: String,
}

/// `POST /api/tasks/ai-assistant` — free-text plan for the pending tasks,
/// either a priority ordering or a time estimate anchored to today.
#[debug_handler(state = AppState)]
pub(super) async fn ai_assistant(
    State(ai): State<AiClients>,
    Json(request): Json<AssistantRequest>,
) -> AppResult<Json<AssistantResponse>> {
    let tasks: Vec<Task> = request
        .tasks
        .and_then(|value| serde_json::from_value(value).ok())
        .ok_or_else(|| AppError::BadRequest("Invalid tasks data".to_owned()))?;

    let pending: Vec<Task> = tasks.into_iter().filter(|t| !t.completed).collect();
    if pending.is_empty() {
        return Ok(Json(AssistantResponse {
            response: "🎉 Selamat! Kamu tidak punya tugas yang pending. Semua tugas sudah selesai!"
                .to_owned(),
        }));
    }

    let today = OffsetDateTime::now_utc().date();
    let prompt = match request.analysis_type.as_str() {
        "prioritize" => prioritize_prompt(&pending),
        "estimate" => estimate_prompt(&pending, today),
        _ => {
            return Err(AppError::BadRequest(
                "Invalid analysis type. Use \"prioritize\" or \"estimate\"".to_owned(),
            ))
        }
    };

    let groq = ai.groq()?;
    let response = groq
        .chat(
            &[ChatMessage { role: "user".to_owned(), content: prompt }],
            ASSISTANT_MAX_TOKENS,
        )
        .await?;
    Ok(Json(AssistantResponse { response }))
}

const MONTHS: [&str; 12] = [
    "Januari", "Februari", "Maret", "April", "Mei", "Juni",
    "Juli", "Agustus", "September", "Oktober", "November", "Desember",
];

fn indonesian_date(date: Date) -> String {
    format!("{} {} {}", date.day(), MONTHS[date.month() as usize - 1], date.year())
}

fn indonesian_weekday_date(date: Date) -> String {
    let weekday = match date.weekday() {
        time::Weekday::Monday => "Senin",
        time::Weekday::Tuesday => "Selasa",
        time::Weekday::Wednesday => "Rabu",
        time::Weekday::Thursday => "Kamis",
        time::Weekday::Friday => "Jumat",
        time::Weekday::Saturday => "Sabtu",
        time::Weekday::Sunday => "Minggu",
    };
    format!("{weekday}, {}", indonesian_date(date))
}

/// Deadlines arrive as ISO strings; only the date part matters here.
fn parse_deadline(deadline: &str) -> Option<Date> {
    let date_part = deadline.get(..10)?;
    Date::parse(date_part, format_description!("[year]-[month]-[day]")).ok()
}

fn or_unspecified(value: &str, fallback: &str) -> String {
    if value.is_empty() { fallback.to_owned() } else { value.to_owned() }
}

fn prioritize_prompt(pending: &[Task]) -> String {
    let task_list: String = pending
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let deadline = task
                .deadline
                .as_deref()
                .and_then(parse_deadline)
                .map(indonesian_date)
                .unwrap_or_else(|| "Tidak ada deadline".to_owned());
            format!(
                "\n{}. **{}**\n   - Mata Kuliah: {}\n   - Deskripsi: {}\n   - Prioritas saat ini: {}\n   - Deadline: {}\n",
                i + 1,
                task.title,
                or_unspecified(&task.category, "Tidak disebutkan"),
                or_unspecified(&task.description, "Tidak ada deskripsi"),
                task.priority,
                deadline,
            )
        })
        .collect();

    format!(
        "Kamu adalah AI Task Prioritizer yang membantu mahasiswa mengatur prioritas tugas mereka.

Berikut adalah daftar tugas yang belum selesai:
{task_list}
Tugas kamu:
1. Analisis semua tugas berdasarkan deadline, prioritas, dan urgensi
2. Berikan rekomendasi urutan pengerjaan (mana yang harus dikerjakan terlebih dahulu)
3. Berikan alasan singkat untuk setiap rekomendasi
4. Berikan tips produktivitas untuk menyelesaikan semua tugas

Format jawaban:
🎯 **REKOMENDASI PRIORITAS TUGAS**

**Urutan Pengerjaan yang Disarankan:**

1. [Nama Tugas]
   ⏰ Alasan: [Jelaskan mengapa tugas ini prioritas utama]

2. [Nama Tugas]
   ⏰ Alasan: [Jelaskan mengapa tugas ini prioritas kedua]

(dan seterusnya...)

💡 **Tips Produktivitas:**
- [Tip 1]
- [Tip 2]
- [Tip 3]

Jawab dalam bahasa Indonesia yang ramah dan memotivasi!"
    )
}

fn estimate_prompt(pending: &[Task], today: Date) -> String {
    let today_formatted = indonesian_weekday_date(today);
    let task_list: String = pending
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let deadline = task.deadline.as_deref().and_then(parse_deadline);
            let deadline_text = deadline
                .map(indonesian_date)
                .unwrap_or_else(|| "Tidak ada deadline".to_owned());
            let remaining = deadline
                .map(|d| format!("{} hari lagi", (d - today).whole_days()))
                .unwrap_or_else(|| "Tidak ada deadline".to_owned());
            format!(
                "\n{}. **{}**\n   - Mata Kuliah: {}\n   - Deskripsi: {}\n   - Deadline: {}\n   - Sisa waktu: {}\n",
                i + 1,
                task.title,
                or_unspecified(&task.category, "Tidak disebutkan"),
                or_unspecified(&task.description, "Tidak ada deskripsi"),
                deadline_text,
                remaining,
            )
        })
        .collect();

    format!(
        "Kamu adalah AI Time Estimator yang membantu mahasiswa memperkirakan waktu pengerjaan tugas.

**INFORMASI PENTING:**
- Hari ini adalah: {today_formatted}
- Tanggal saat ini: {today}
- JANGAN memberikan saran mulai di masa lalu! Semua saran harus mulai dari hari ini atau sesudahnya.

Berikut adalah daftar tugas yang belum selesai:
{task_list}
Tugas kamu:
1. Perkirakan waktu yang dibutuhkan untuk menyelesaikan setiap tugas (dalam jam)
2. Berikan breakdown waktu jika tugas bisa dipecah menjadi sub-tasks
3. Berikan saran kapan sebaiknya mulai mengerjakan berdasarkan deadline (HARUS mulai dari hari ini atau sesudahnya, JANGAN masa lalu!)
4. Total waktu yang dibutuhkan untuk menyelesaikan semua tugas
5. Pertimbangkan deadline dan prioritaskan tugas yang deadline-nya lebih dekat

Format jawaban:
⏱️ **ESTIMASI WAKTU PENGERJAAN**

**Per Tugas:**

1. **[Nama Tugas]**
   - Estimasi waktu: [X jam]
   - Breakdown:
     • [Sub-task 1]: [X jam]
     • [Sub-task 2]: [X jam]
   - Saran mulai: [Sebutkan tanggal yang realistis, MINIMAL mulai hari ini ({today_formatted})]
   - Rekomendasi: [Kapan harus selesai, jadwal pengerjaan]

2. **[Nama Tugas]**
   (format sama...)

📊 **Ringkasan:**
- Total waktu dibutuhkan: [X jam]
- Rata-rata per tugas: [X jam]
- Rekomendasi jadwal: [Saran jadwal harian mulai dari hari ini]

⚠️ **Peringatan Deadline:**
[Sebutkan tugas mana yang deadline-nya mendesak dan perlu dikerjakan segera]

💡 **Tips Manajemen Waktu:**
- [Tip 1]
- [Tip 2]
- [Tip 3]

PENTING: Semua saran tanggal mulai HARUS mulai dari hari ini ({today_formatted}) atau sesudahnya. TIDAK BOLEH masa lalu!

Jawab dalam bahasa Indonesia yang ramah dan realistis!"
    )
}
