//! The single-page viewer UI.
//!
//! A static HTML shell with a small polling script: check `/image/status`
//! on the poll interval, re-fetch `/image` only when the timestamp changes,
//! and keep the server's viewer count honest via `/connect` and
//! `/disconnect` beacons.

use crate::cache::CachedScene;

const PAGE_TEMPLATE: &str = r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width,initial-scale=1" />
    <title>Driftscape — Seasonal Scenes</title>
    <style>
      html,body { height:100%; margin:0; background:#111; color:#fff;
        display:flex; align-items:center; justify-content:center;
        font-family:'Segoe UI', Tahoma, sans-serif; overflow:hidden; }
      #imgContainer { width:100%; height:100%; display:none;
        align-items:center; justify-content:center; }
      #img { width:100%; height:100%; object-fit:contain; display:block; }
      #meta { position:fixed; left:50%; bottom:8px; transform:translateX(-50%);
        background:rgba(0,0,0,0.25); padding:4px 8px; border-radius:6px;
        font-size:12px; opacity:0.5; max-width:90%; text-align:center;
        transition:opacity 0.2s; }
      #meta:hover { opacity:0.9; }
      #splash { display:flex; flex-direction:column; align-items:center;
        text-align:center; padding:40px; border-radius:20px;
        background:linear-gradient(135deg, rgba(40,80,140,0.25), rgba(200,170,80,0.15)); }
      #splash-title { font-size:3em; font-weight:700; letter-spacing:2px; }
      #splash-version { margin-top:20px; font-size:0.9em; opacity:0.6; }
    </style>
  </head>
  <body>
    <div id="imgContainer"><img id="img" alt="Seasonal scene" /></div>
    <div id="splash">
      <div id="splash-title">Driftscape</div>
      <div>Continuously drifting seasonal scenes</div>
      <div id="splash-version">Version __VERSION__</div>
    </div>
    <div id="meta">Prompt: <span id="prompt">(generating) — please wait...</span></div>
    <script>
      const pollMs = __POLL_MS__;
      const initialImage = __INITIAL_IMAGE__;
      const initialPrompt = __INITIAL_PROMPT__;
      const img = document.getElementById('img');
      const promptEl = document.getElementById('prompt');
      let lastTimestamp = null;

      try { navigator.sendBeacon('/connect'); } catch (e) {}
      window.addEventListener('beforeunload', function () {
        try { navigator.sendBeacon('/disconnect'); } catch (e) {}
      });

      function show(imageData, promptText) {
        img.src = imageData;
        promptEl.textContent = promptText || '';
        document.getElementById('imgContainer').style.display = 'flex';
        document.getElementById('splash').style.display = 'none';
      }

      if (initialImage) { show(initialImage, initialPrompt); }

      async function poll() {
        try {
          const statusRes = await fetch('/image/status');
          if (!statusRes.ok) return;
          const status = await statusRes.json();
          if (!status.available) return;
          if (lastTimestamp !== null && status.timestamp === lastTimestamp) return;

          const res = await fetch('/image');
          if (!res.ok) return;
          const scene = await res.json();
          if (scene.image_data) {
            show(scene.image_data, scene.prompt);
            lastTimestamp = status.timestamp;
          }
        } catch (e) { console.error(e); }
      }

      poll();
      setInterval(poll, pollMs);
    </script>
  </body>
</html>
"#;

/// Render the viewer page with the poll interval and any cached scene
/// baked in, so returning viewers see an image before the first poll.
pub fn render(poll_secs: u64, version: &str, cached: Option<&CachedScene>) -> String {
    let initial_image = cached
        .map(|s| serde_json::to_string(&s.image_data).unwrap_or_else(|_| "null".to_string()))
        .unwrap_or_else(|| "null".to_string());
    let initial_prompt = cached
        .map(|s| serde_json::to_string(&s.prompt).unwrap_or_else(|_| "null".to_string()))
        .unwrap_or_else(|| "null".to_string());

    PAGE_TEMPLATE
        .replace("__POLL_MS__", &(poll_secs * 1000).to_string())
        .replace("__VERSION__", version)
        .replace("__INITIAL_IMAGE__", &initial_image)
        .replace("__INITIAL_PROMPT__", &initial_prompt)
}
