use once_cell::sync::Lazy;
use std::collections::HashMap;

/// 逻辑邮件服务器地址表
static MAIL_SERVERS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("disang", "202.141.80.9"),
        ("naambor", "202.141.80.10"),
        ("tambdil", "202.141.80.11"),
        ("teesta", "202.141.80.12"),
    ])
});

/// 按逻辑名查找服务器地址
pub fn lookup(name: &str) -> Option<&'static str> {
    MAIL_SERVERS.get(name.to_lowercase().as_str()).copied()
}
