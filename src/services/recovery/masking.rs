//! 이메일 마스킹
//!
//! 로컬 파트 길이 `n`(문자 수)에 따라:
//!
//! | n | 결과 |
//! |---|------|
//! | 0, 1 | `*` |
//! | 2 | 첫 글자 + `*` |
//! | 3 | 앞 두 글자 + `*` |
//! | 4 | 앞 세 글자 + `*` |
//! | 5 이상 | 앞 세 글자 + `*` × (n−4) + 마지막 글자 |
//!
//! 도메인은 그대로 둡니다.

pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => format!("{}@{}", mask_local_part(local), domain),
        None => mask_local_part(email),
    }
}

fn mask_local_part(local: &str) -> String {
    let chars: Vec<char> = local.chars().collect();
    let n = chars.len();

    match n {
        0 | 1 => "*".to_string(),
        2..=4 => {
            let kept: String = chars[..n - 1].iter().collect();
            format!("{}*", kept)
        }
        _ => {
            let head: String = chars[..3].iter().collect();
            format!("{}{}{}", head, "*".repeat(n - 4), chars[n - 1])
        }
    }
}
