#![allow(missing_docs)]

pub const SITE_CONFIG: &str = r#"
# site configuration
site = example.org
listen 80; listen 443

tls {
    cert "/etc/ssl/site.pem"
    key  '/etc/ssl/site.key'   // private
    protocols TLSv1.2 TLSv1.3
}

routes {
    { path /; handler static }
    { path "/api/*"; handler = proxy
      upstream `10.0.0.5:9000` }
}

/* disabled
motd hello
*/
banner Welcome\; enjoy\ 
"#;
