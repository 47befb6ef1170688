//! Markup for the single-screen shell.
//!
//! Pure string builders so the layout can be checked without a browser.

use crate::game::{GameSnapshot, MessageTone, PhaseKind};

pub const ROOT_ID: &str = "ym-root";
pub const CANVAS_ID: &str = "ym-wheel";
pub const SOUND_ID: &str = "ym-sound";
pub const HEARTS_ID: &str = "ym-hearts";
pub const TIMER_ID: &str = "ym-timer";
pub const CONTROLS_ID: &str = "ym-controls";
pub const MESSAGE_ID: &str = "ym-message";
pub const SCORE_ID: &str = "ym-score";
pub const BEST_ID: &str = "ym-best";
pub const RESET_ID: &str = "ym-reset";
pub const OVERLAY_ID: &str = "ym-overlay";

const FONT_TITLE: &str = "font-family:Montserrat, sans-serif;";
const FONT_BODY: &str = "font-family:'Open Sans', sans-serif;";

pub const ROOT_STYLE: &str = "position:relative; max-width:32rem; margin:2rem auto; padding:2rem; text-align:center; color:#fff; background:rgba(12,20,69,0.85); border:4px solid #fde047; border-radius:1.5rem; box-shadow:0 10px 30px rgba(0,0,0,0.5), inset 0 0 15px rgba(253,224,71,0.3);";
pub const BODY_STYLE: &str = "margin:0; min-height:100vh; background-color:#0c1445;";

const BUTTON_BASE: &str = "font-weight:bold; border:none; border-radius:9999px; cursor:pointer; transition:transform 0.2s;";

/// User intents coming from clicks or keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Spin,
    Choose(usize), // slot 0 = left, 1 = right
    Reset,
    ToggleSound,
}

impl Action {
    /// Decode a `data-action` attribute (plus `data-choice` for choices).
    pub fn from_attrs(action: &str, choice: Option<&str>) -> Option<Action> {
        match action {
            "spin" => Some(Action::Spin),
            "reset" => Some(Action::Reset),
            "sound" => Some(Action::ToggleSound),
            "choice" => choice.and_then(|c| c.parse().ok()).map(Action::Choose),
            _ => None,
        }
    }

    pub fn from_key(key: &str) -> Option<Action> {
        match key {
            " " | "Enter" => Some(Action::Spin),
            "1" => Some(Action::Choose(0)),
            "2" => Some(Action::Choose(1)),
            "r" | "R" => Some(Action::Reset),
            "m" | "M" => Some(Action::ToggleSound),
            _ => None,
        }
    }

    /// Shortcut for a keydown whose target has tag `target_tag`. Space and
    /// Enter are left alone on controls that activate themselves with them.
    pub fn from_key_on(key: &str, target_tag: &str) -> Option<Action> {
        let activates = matches!(key, " " | "Enter");
        let native = ["BUTTON", "INPUT", "TEXTAREA", "SELECT", "A"]
            .iter()
            .any(|tag| target_tag.eq_ignore_ascii_case(tag));
        if activates && native {
            return None;
        }
        Action::from_key(key)
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Static skeleton; dynamic regions are filled in every frame.
pub fn skeleton_html(wheel_px: u32) -> String {
    format!(
        "<style>@keyframes ym-pulse {{ 50% {{ opacity:0.4; }} }}</style>\
         <button id='{SOUND_ID}' data-action='sound' style='position:absolute; top:1rem; right:1rem; padding:0.5rem; {BUTTON_BASE} background:#fde047; color:#1e3a8a;'></button>\
         <h1 style='{FONT_TITLE} font-size:3rem; font-weight:900; color:#fde047; margin:0 0 0.5rem; text-shadow:0 0 10px #fde047, 0 0 20px #f59e0b;'>YAZIM MAKİNESİ</h1>\
         <p style='{FONT_BODY} font-size:1.25rem; color:#d1d5db; margin:0 0 1rem;'>Çarkı Çevir, Doğruyu Bul!</p>\
         <div style='display:flex; justify-content:space-between; align-items:center; margin-bottom:1.5rem; min-height:2rem;'>\
           <div id='{HEARTS_ID}'></div><div id='{TIMER_ID}'></div>\
         </div>\
         <div style='position:relative; width:{w}px; height:{w}px; margin:0 auto 2rem;'>\
           <div style='position:absolute; top:-8px; left:50%; transform:translateX(-50%); z-index:10; width:0; height:0; border-left:25px solid transparent; border-right:25px solid transparent; border-top:35px solid #ef4444; filter:drop-shadow(0 -2px 2px rgba(0,0,0,0.5));'></div>\
           <canvas id='{CANVAS_ID}' width='{wheel_px}' height='{wheel_px}' style='{rot}'></canvas>\
         </div>\
         <div id='{CONTROLS_ID}' style='min-height:120px; display:flex; flex-wrap:wrap; align-items:center; justify-content:center; gap:1rem;'></div>\
         <div id='{MESSAGE_ID}' style='{FONT_TITLE} margin-top:1.5rem; font-size:1.875rem; font-weight:bold; height:2.5rem;'></div>\
         <div style='{FONT_BODY} margin-top:1rem; display:flex; justify-content:space-between; font-size:1.25rem;'>\
           <div id='{SCORE_ID}' style='background:rgba(0,0,0,0.3); padding:0.5rem; border-radius:0.5rem;'></div>\
           <div id='{BEST_ID}' style='background:rgba(0,0,0,0.3); padding:0.5rem; border-radius:0.5rem;'></div>\
         </div>\
         <div id='{RESET_ID}' style='margin-top:1rem;'></div>\
         <div id='{OVERLAY_ID}'></div>",
        w = wheel_px,
        rot = rotation_style(0.0),
    )
}

/// Canvas style carrying the spin rotation. The browser eases between values.
pub fn rotation_style(rotation_deg: f64) -> String {
    format!(
        "display:block; transform:rotate({rotation_deg}deg); transition:transform 4s cubic-bezier(0.25, 1, 0.5, 1);"
    )
}

pub fn sound_html(enabled: bool) -> String {
    if enabled { "🔊".to_string() } else { "🔇".to_string() }
}

pub fn hearts_html(lives: u8, max: u8) -> String {
    let mut html = String::new();
    for i in 0..max {
        if i < lives {
            html.push_str("<span style='color:#ef4444;font-size:24px;margin-right:4px;'>♥</span>");
        } else {
            html.push_str("<span style='color:#6b7280;font-size:24px;margin-right:4px;'>♡</span>");
        }
    }
    html
}

pub fn timer_html(time_left: Option<u32>) -> String {
    match time_left {
        None => String::new(),
        Some(t) if t <= 3 => format!(
            "<span style='font-size:1.5rem;font-weight:bold;color:#f87171;animation:ym-pulse 1s infinite;'>⏱️ {t}</span>"
        ),
        Some(t) => format!("<span style='font-size:1.5rem;font-weight:bold;color:#fde047;'>⏱️ {t}</span>"),
    }
}

pub fn controls_html(snap: &GameSnapshot) -> String {
    match snap.phase {
        PhaseKind::GameOver => String::new(),
        PhaseKind::AwaitingAnswer => {
            let mut html = String::new();
            if let Some(choices) = snap.choices {
                for (slot, choice) in choices.iter().enumerate() {
                    html.push_str(&format!(
                        "<button data-action='choice' data-choice='{slot}' style='{FONT_TITLE} {BUTTON_BASE} width:45%; padding:1rem 2rem; font-size:1.25rem; color:#fff; background:linear-gradient(to bottom right,#c084fc,#7e22ce);'>{}</button>",
                        escape_html(choice)
                    ));
                }
            }
            html
        }
        phase => {
            let spinning = matches!(phase, PhaseKind::Spinning | PhaseKind::Highlighting);
            let disabled = phase != PhaseKind::Idle;
            let label = if spinning { "DÖNÜYOR..." } else { "ÇEVİR" };
            let bg = if disabled {
                "background:#6b7280; cursor:not-allowed;"
            } else {
                "background:linear-gradient(to bottom right,#fde047,#ca8a04);"
            };
            format!(
                "<button data-action='spin'{} style='{FONT_TITLE} {BUTTON_BASE} padding:1rem 2.5rem; font-size:1.5rem; color:#1e3a8a; {bg}'>{label}</button>",
                if disabled { " disabled" } else { "" }
            )
        }
    }
}

pub fn message_html(snap: &GameSnapshot) -> String {
    match &snap.message {
        None => String::new(),
        Some(msg) => {
            let color = match msg.tone {
                MessageTone::Success => "#4ade80",
                MessageTone::Failure => "#f87171",
            };
            format!("<span style='color:{color};'>{}</span>", escape_html(&msg.text))
        }
    }
}

pub fn score_html(score: u32) -> String {
    format!("PUAN: <span style='font-weight:bold;color:#fde047;'>{score}</span>")
}

pub fn best_html(high_score: u32) -> String {
    format!("REKOR: <span style='font-weight:bold;color:#4ade80;'>{high_score}</span>")
}

pub fn reset_html(game_over: bool) -> String {
    if game_over {
        return String::new();
    }
    format!(
        "<button data-action='reset' style='{FONT_TITLE} {BUTTON_BASE} padding:0.5rem 1rem; font-size:0.875rem; color:#fff; background:linear-gradient(to bottom right,#9ca3af,#4b5563);'>↻ YENİDEN BAŞLAT</button>"
    )
}

pub fn overlay_html(snap: &GameSnapshot) -> String {
    if snap.phase != PhaseKind::GameOver {
        return String::new();
    }
    let record = if snap.new_record {
        "<p style='font-size:1.25rem;color:#4ade80;margin:0 0 1rem;'>🎉 YENİ REKOR! 🎉</p>"
    } else {
        ""
    };
    format!(
        "<div style='position:absolute; inset:0; background:rgba(0,0,0,0.8); display:flex; align-items:center; justify-content:center; border-radius:1.5rem;'>\
           <div>\
             <h2 style='font-size:2.25rem;font-weight:bold;color:#f87171;margin:0 0 1rem;'>OYUN BİTTİ!</h2>\
             <p style='font-size:1.5rem;color:#fde047;margin:0 0 0.5rem;'>Final Puanınız: {score}</p>\
             {record}\
             <button data-action='reset' style='{FONT_TITLE} {BUTTON_BASE} padding:1rem 2rem; font-size:1.25rem; color:#fff; background:linear-gradient(to bottom right,#4ade80,#15803d);'>↻ YENİDEN OYNA</button>\
           </div>\
         </div>",
        score = snap.score,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Message;

    fn snapshot(phase: PhaseKind) -> GameSnapshot {
        GameSnapshot {
            phase,
            score: 30,
            lives: 2,
            high_score: 40,
            new_record: false,
            rotation: 0.0,
            selected_segment: None,
            highlighted_segment: None,
            choices: None,
            time_left: None,
            message: None,
        }
    }

    #[test]
    fn test_action_decoding() {
        assert_eq!(Action::from_attrs("spin", None), Some(Action::Spin));
        assert_eq!(Action::from_attrs("choice", Some("1")), Some(Action::Choose(1)));
        assert_eq!(Action::from_attrs("choice", Some("x")), None);
        assert_eq!(Action::from_attrs("choice", None), None);
        assert_eq!(Action::from_attrs("bogus", None), None);
        assert_eq!(Action::from_key(" "), Some(Action::Spin));
        assert_eq!(Action::from_key("2"), Some(Action::Choose(1)));
        assert_eq!(Action::from_key("M"), Some(Action::ToggleSound));
        assert_eq!(Action::from_key("q"), None);
    }

    #[test]
    fn test_enter_on_focused_button_is_not_a_spin() {
        assert_eq!(Action::from_key_on("Enter", "BUTTON"), None);
        assert_eq!(Action::from_key_on(" ", "button"), None);
        assert_eq!(Action::from_key_on("Enter", "BODY"), Some(Action::Spin));
        assert_eq!(Action::from_key_on(" ", "CANVAS"), Some(Action::Spin));
        // letter and digit shortcuts still work with a button focused
        assert_eq!(Action::from_key_on("1", "BUTTON"), Some(Action::Choose(0)));
        assert_eq!(Action::from_key_on("r", "BUTTON"), Some(Action::Reset));
    }

    #[test]
    fn test_hearts_show_remaining_lives() {
        let html = hearts_html(2, 3);
        assert_eq!(html.matches('♥').count(), 2);
        assert_eq!(html.matches('♡').count(), 1);
    }

    #[test]
    fn test_timer_hidden_without_question_and_red_near_end() {
        assert!(timer_html(None).is_empty());
        assert!(timer_html(Some(8)).contains("#fde047"));
        assert!(timer_html(Some(3)).contains("#f87171"));
    }

    #[test]
    fn test_controls_per_phase() {
        let idle = controls_html(&snapshot(PhaseKind::Idle));
        assert!(idle.contains("ÇEVİR") && !idle.contains("disabled"));
        let spinning = controls_html(&snapshot(PhaseKind::Spinning));
        assert!(spinning.contains("DÖNÜYOR...") && spinning.contains("disabled"));
        assert!(controls_html(&snapshot(PhaseKind::GameOver)).is_empty());

        let mut q = snapshot(PhaseKind::AwaitingAnswer);
        q.choices = Some(["Kitab", "Kitap"]);
        let html = controls_html(&q);
        assert!(html.find("Kitab").unwrap() < html.find("Kitap").unwrap());
        assert!(html.contains("data-choice='0'") && html.contains("data-choice='1'"));
    }

    #[test]
    fn test_message_coloured_by_tone() {
        let mut snap = snapshot(PhaseKind::Resolved);
        snap.message = Some(Message { text: "Doğru! 🎉".into(), tone: MessageTone::Success });
        assert!(message_html(&snap).contains("#4ade80"));
        snap.message = Some(Message { text: "<b>".into(), tone: MessageTone::Failure });
        let html = message_html(&snap);
        assert!(html.contains("#f87171") && html.contains("&lt;b&gt;"));
    }

    #[test]
    fn test_overlay_only_on_game_over() {
        assert!(overlay_html(&snapshot(PhaseKind::Idle)).is_empty());
        let mut over = snapshot(PhaseKind::GameOver);
        let html = overlay_html(&over);
        assert!(html.contains("OYUN BİTTİ!") && html.contains("30") && !html.contains("YENİ REKOR"));
        over.new_record = true;
        assert!(overlay_html(&over).contains("YENİ REKOR"));
        assert!(reset_html(true).is_empty());
        assert!(reset_html(false).contains("data-action='reset'"));
    }

    #[test]
    fn test_rotation_style_carries_degrees() {
        assert!(rotation_style(1980.5).contains("rotate(1980.5deg)"));
    }
}
